// Constants for the interpreter

/// Default throttle factor: one live tick out of every 8 while no loop is open
pub const DEFAULT_SLOWDOWN: u32 = 8;

/// Default number of checkpoints retained for reverse execution
pub const DEFAULT_MAX_CHECKPOINTS: usize = 100_000;
