//! Descriptor loader and script cache.
//!
//! Turns a resolved [`DescriptorSource`] into something that can be run.
//! Script imports are memoized by normalized path, including failures, until
//! [`DescriptorLoader::clear_cache`] is called.
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, info, warn};

use anim_core::{AnimationScript, DescriptorSource};

use crate::api::{Macro, MacroDirectory, ScriptLoadError, ScriptSource};

/// Runnable form of a descriptor.
#[derive(Clone)]
pub enum Producer {
    Script {
        path: String,
        script: Arc<dyn AnimationScript>,
    },
    Macro {
        reference: String,
        handle: Arc<dyn Macro>,
    },
    DirectAsset {
        animation: String,
        sound: Option<String>,
    },
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Producer::Script { path, .. } => f.debug_struct("Script").field("path", path).finish(),
            Producer::Macro { reference, .. } => {
                f.debug_struct("Macro").field("reference", reference).finish()
            }
            Producer::DirectAsset { animation, sound } => f
                .debug_struct("DirectAsset")
                .field("animation", animation)
                .field("sound", sound)
                .finish(),
        }
    }
}

type ScriptCache = HashMap<String, Option<Arc<dyn AnimationScript>>>;

pub struct DescriptorLoader {
    module_root: String,
    scripts: Arc<dyn ScriptSource>,
    macros: Arc<dyn MacroDirectory>,
    cache: Mutex<ScriptCache>,
}

impl DescriptorLoader {
    pub fn new(
        module_root: impl Into<String>,
        scripts: Arc<dyn ScriptSource>,
        macros: Arc<dyn MacroDirectory>,
    ) -> Self {
        Self {
            module_root: module_root.into(),
            scripts,
            macros,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Prefixes the module root unless the path already carries it.
    pub fn normalize(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.starts_with(&self.module_root) {
            path.to_string()
        } else {
            format!("{}/{}", self.module_root, path)
        }
    }

    pub async fn producer(&self, source: &DescriptorSource) -> Option<Producer> {
        match source {
            DescriptorSource::Script(path) => {
                let path = self.normalize(path);
                let script = self.load_script(&path).await?;
                Some(Producer::Script { path, script })
            }
            DescriptorSource::Macro(reference) => {
                let handle = self.find_macro(reference)?;
                Some(Producer::Macro {
                    reference: reference.clone(),
                    handle,
                })
            }
            DescriptorSource::DirectAsset { animation, sound } => Some(Producer::DirectAsset {
                animation: animation.clone(),
                sound: sound.clone(),
            }),
        }
    }

    /// Returns the cached entry point, importing on first use.
    ///
    /// The cache lock is released across the import, so two concurrent misses
    /// on one path may both import; the later result wins.
    pub async fn load_script(&self, path: &str) -> Option<Arc<dyn AnimationScript>> {
        let path = self.normalize(path);
        if let Some(cached) = self.lock().get(&path) {
            return cached.clone();
        }

        let loaded = match self.scripts.import(&path).await {
            Ok(module) => {
                let entry = module.entry_point();
                if entry.is_none() {
                    warn!(target: "runtime::loader", %path, "animation script has no entry point");
                }
                entry
            }
            Err(ScriptLoadError::NotFound(_)) => {
                debug!(target: "runtime::loader", %path, "no animation script at path");
                None
            }
            Err(error) => {
                debug!(target: "runtime::loader", %path, %error, "could not load animation script");
                None
            }
        };

        self.lock().insert(path, loaded.clone());
        loaded
    }

    /// Looks a macro up by id, then by name.
    pub fn find_macro(&self, reference: &str) -> Option<Arc<dyn Macro>> {
        let found = self.macros.find(reference);
        if found.is_none() {
            warn!(target: "runtime::loader", reference, "macro not found");
        }
        found
    }

    /// Drops every cached import, failures included. Returns how many were dropped.
    pub fn clear_cache(&self) -> usize {
        let mut cache = self.lock();
        let cleared = cache.len();
        cache.clear();
        info!(target: "runtime::loader", cleared, "animation script cache cleared");
        cleared
    }

    pub fn cached_paths(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use anim_core::{AnimationContext, ScriptError, Sequence};

    use crate::api::ScriptModule;
    use crate::oracle::MacroDirectoryImpl;

    fn noop() -> Arc<dyn AnimationScript> {
        Arc::new(|_: &mut Sequence, _: &AnimationContext| Ok::<(), ScriptError>(()))
    }

    /// Counts imports and serves one known path.
    struct CountingSource {
        imports: AtomicUsize,
    }

    #[async_trait]
    impl ScriptSource for CountingSource {
        async fn import(&self, path: &str) -> Result<ScriptModule, ScriptLoadError> {
            self.imports.fetch_add(1, Ordering::SeqCst);
            match path {
                "modules/strikefx/animations/laser/laser.js" => Ok(ScriptModule::with_execute(noop())),
                "modules/strikefx/animations/empty.js" => Ok(ScriptModule::default()),
                other => Err(ScriptLoadError::NotFound(other.to_string())),
            }
        }
    }

    fn loader() -> (Arc<CountingSource>, DescriptorLoader) {
        let source = Arc::new(CountingSource {
            imports: AtomicUsize::new(0),
        });
        let loader = DescriptorLoader::new(
            "modules/strikefx",
            source.clone(),
            Arc::new(MacroDirectoryImpl::new()),
        );
        (source, loader)
    }

    #[test]
    fn normalizes_relative_and_absolute_paths() {
        let (_, loader) = loader();
        assert_eq!(
            loader.normalize("animations/laser/laser.js"),
            "modules/strikefx/animations/laser/laser.js"
        );
        assert_eq!(
            loader.normalize("/modules/strikefx/animations/laser/laser.js"),
            "modules/strikefx/animations/laser/laser.js"
        );
    }

    #[tokio::test]
    async fn hits_and_misses_are_both_cached() {
        let (source, loader) = loader();

        assert!(loader.load_script("animations/laser/laser.js").await.is_some());
        assert!(loader.load_script("animations/laser/laser.js").await.is_some());
        assert!(loader.load_script("animations/projectile/heavy.js").await.is_none());
        assert!(loader.load_script("animations/projectile/heavy.js").await.is_none());

        assert_eq!(source.imports.load(Ordering::SeqCst), 2);
        assert_eq!(loader.cached_paths(), 2);
    }

    #[tokio::test]
    async fn module_without_entry_point_is_not_found() {
        let (_, loader) = loader();
        assert!(loader.load_script("animations/empty.js").await.is_none());
        assert_eq!(loader.cached_paths(), 1);
    }

    #[tokio::test]
    async fn clear_forces_reimport() {
        let (source, loader) = loader();
        loader.load_script("animations/laser/laser.js").await;
        assert_eq!(loader.clear_cache(), 1);
        loader.load_script("animations/laser/laser.js").await;
        assert_eq!(source.imports.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn direct_assets_need_no_lookup() {
        let (source, loader) = loader();
        let producer = loader
            .producer(&DescriptorSource::DirectAsset {
                animation: "jb2a.arrow".into(),
                sound: None,
            })
            .await;
        assert!(matches!(producer, Some(Producer::DirectAsset { .. })));
        assert_eq!(source.imports.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_macro_has_no_producer() {
        let (_, loader) = loader();
        let producer = loader
            .producer(&DescriptorSource::Macro("Nope".into()))
            .await;
        assert!(producer.is_none());
    }
}
