//=========================================================================
// Game Objects
//=========================================================================
//
// Scene tree nodes, the component contract and the arena holding both.
//
// Architecture:
//   World (arena, one per scene)
//     ├─ GameObject { tag, transform, components, children, parent }
//     └─ ComponentSlot { owner, enabled, render_camera, behaviour }
//   Layer (ordered roots, owned by the scene)
//
//=========================================================================

//=== External Dependencies ===============================================

use slotmap::new_key_type;

//=== Module Declarations =================================================

mod component;
mod game_object;
mod layer;
mod world;

//=== Public API ==========================================================

pub use component::{AsAny, Capability, Component, ComponentContext};
pub use game_object::GameObject;
pub use layer::{Layer, DEFAULT_LAYER};
pub use world::World;

new_key_type! {
    /// Handle to a game object in a scene's world.
    pub struct GameObjectId;

    /// Handle to a component in a scene's world.
    pub struct ComponentId;
}
