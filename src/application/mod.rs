/// Application layer - Use cases, DTOs, and the pinned-set store
pub mod dto;
pub mod pinned_set;
pub mod use_cases;
