//=========================================================================
// Globals
//=========================================================================
//
// The engine context replacing a process-wide singleton: one value, built
// by the game driver and passed by `&mut` through every lifecycle call.
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;

//=== Public API ==========================================================

pub use global_context::EngineContext;
