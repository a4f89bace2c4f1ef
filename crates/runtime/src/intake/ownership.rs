//! Which connected client renders an attack.

use crate::api::PermissionOracle;

/// The local client animates attacks by actors it owns, and the GM client
/// additionally animates actors no player owns.
pub fn is_animation_owner(permissions: &dyn PermissionOracle, actor_id: &str) -> bool {
    if permissions.is_owner(actor_id) {
        return true;
    }
    !permissions.has_player_owner(actor_id) && permissions.is_gm()
}
