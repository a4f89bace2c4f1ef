//! Resolved, playable animation descriptors.

use thiserror::Error;

use crate::weapon::AttackMode;

/// Errors raised when a descriptor would violate its invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("speed must be a positive finite number, got {0}")]
    InvalidSpeed(f64),

    #[error("{kind} reference must not be empty")]
    EmptyReference { kind: DescriptorKind },
}

/// Discriminant of [`DescriptorSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DescriptorKind {
    Macro,
    Script,
    DirectAsset,
}

/// What actually produces the effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorSource {
    /// User-authored macro, looked up by identifier or name.
    Macro(String),
    /// Bundled animation script, loaded by path and cached.
    Script(String),
    /// Direct asset reference with an optional sound cue.
    DirectAsset {
        animation: String,
        #[cfg_attr(feature = "serde", serde(default))]
        sound: Option<String>,
    },
}

impl DescriptorSource {
    pub fn kind(&self) -> DescriptorKind {
        match self {
            DescriptorSource::Macro(_) => DescriptorKind::Macro,
            DescriptorSource::Script(_) => DescriptorKind::Script,
            DescriptorSource::DirectAsset { .. } => DescriptorKind::DirectAsset,
        }
    }

    fn reference(&self) -> &str {
        match self {
            DescriptorSource::Macro(reference) => reference,
            DescriptorSource::Script(path) => path,
            DescriptorSource::DirectAsset { animation, .. } => animation,
        }
    }
}

/// Resolved representation of which effect to show for a weapon.
///
/// `speed` is the travel time in milliseconds for ranged effects and a relative
/// rate for melee ones. Both `scale` and `speed` are strictly positive.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationDescriptor {
    pub source: DescriptorSource,
    pub mode: AttackMode,
    pub scale: f64,
    pub speed: f64,
}

impl AnimationDescriptor {
    pub fn new(
        source: DescriptorSource,
        mode: AttackMode,
        scale: f64,
        speed: f64,
    ) -> Result<Self, DescriptorError> {
        let descriptor = Self {
            source,
            mode,
            scale,
            speed,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn script(
        path: impl Into<String>,
        mode: AttackMode,
        scale: f64,
        speed: f64,
    ) -> Result<Self, DescriptorError> {
        Self::new(DescriptorSource::Script(path.into()), mode, scale, speed)
    }

    pub fn direct_asset(
        animation: impl Into<String>,
        sound: Option<String>,
        mode: AttackMode,
        scale: f64,
        speed: f64,
    ) -> Result<Self, DescriptorError> {
        let source = DescriptorSource::DirectAsset {
            animation: animation.into(),
            sound,
        };
        Self::new(source, mode, scale, speed)
    }

    /// Checks the positivity and non-empty-reference invariants.
    ///
    /// Deserialized descriptors bypass [`AnimationDescriptor::new`], so loaders
    /// call this after parsing.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if !is_positive(self.scale) {
            return Err(DescriptorError::InvalidScale(self.scale));
        }
        if !is_positive(self.speed) {
            return Err(DescriptorError::InvalidSpeed(self.speed));
        }
        if self.source.reference().trim().is_empty() {
            return Err(DescriptorError::EmptyReference {
                kind: self.source.kind(),
            });
        }
        Ok(())
    }

    pub fn kind(&self) -> DescriptorKind {
        self.source.kind()
    }

    /// Sound cue, only carried by direct-asset descriptors.
    pub fn sound(&self) -> Option<&str> {
        match &self.source {
            DescriptorSource::DirectAsset { sound, .. } => sound.as_deref(),
            _ => None,
        }
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_scale() {
        let err = AnimationDescriptor::script("a.js", AttackMode::Ranged, 0.0, 800.0).unwrap_err();
        assert_eq!(err, DescriptorError::InvalidScale(0.0));
    }

    #[test]
    fn rejects_nan_speed() {
        let err =
            AnimationDescriptor::script("a.js", AttackMode::Ranged, 1.0, f64::NAN).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidSpeed(_)));
    }

    #[test]
    fn rejects_blank_reference() {
        let err = AnimationDescriptor::new(
            DescriptorSource::Macro("  ".into()),
            AttackMode::Melee,
            1.0,
            300.0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            DescriptorError::EmptyReference {
                kind: DescriptorKind::Macro
            }
        );
    }

    #[test]
    fn sound_only_on_direct_assets() {
        let asset = AnimationDescriptor::direct_asset(
            "jb2a.bullet.01.orange",
            Some("sounds/shot.ogg".into()),
            AttackMode::Ranged,
            1.0,
            800.0,
        )
        .unwrap();
        assert_eq!(asset.sound(), Some("sounds/shot.ogg"));
        assert_eq!(asset.kind(), DescriptorKind::DirectAsset);

        let script = AnimationDescriptor::script("a.js", AttackMode::Ranged, 1.0, 800.0).unwrap();
        assert_eq!(script.sound(), None);
    }
}
