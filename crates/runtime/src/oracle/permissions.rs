//! Fixed ownership table for one local user.
use std::collections::HashSet;

use crate::api::PermissionOracle;

#[derive(Debug, Clone, Default)]
pub struct PermissionOracleImpl {
    gm: bool,
    owned: HashSet<String>,
    player_owned: HashSet<String>,
}

impl PermissionOracleImpl {
    /// A GM client owning nothing explicitly.
    pub fn gm() -> Self {
        Self {
            gm: true,
            ..Default::default()
        }
    }

    /// A player client owning the given actors.
    pub fn player<I, S>(owned: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            gm: false,
            owned: owned.into_iter().map(Into::into).collect(),
            player_owned: HashSet::new(),
        }
    }

    /// Marks actors as owned by some player in the session.
    pub fn with_player_owned<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.player_owned.extend(actors.into_iter().map(Into::into));
        self
    }
}

impl PermissionOracle for PermissionOracleImpl {
    fn is_owner(&self, actor_id: &str) -> bool {
        self.owned.contains(actor_id)
    }

    fn has_player_owner(&self, actor_id: &str) -> bool {
        self.player_owned.contains(actor_id)
    }

    fn is_gm(&self) -> bool {
        self.gm
    }
}
