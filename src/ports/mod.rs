/// Ports layer - Interface definitions (Hexagonal Architecture)
pub mod outbound;
