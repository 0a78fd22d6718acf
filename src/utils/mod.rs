pub mod debounce;
pub mod ticker;
