//! Folding configuration layers into one [`Config`].
//!
//! Scalar settings are overwritten by higher-precedence sources. Path
//! definitions are merged by name: a later definition replaces an earlier
//! one in place, and new names are appended in source order.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Folds layers so that later ones override earlier ones.
///
/// # Examples
///
/// ```
/// use pathreg::config::{Config, ConfigMerger};
///
/// let low = Config { cache_resolved: Some(true), ..Default::default() };
/// let high = Config { cache_resolved: Some(false), ..Default::default() };
///
/// let mut merged = low;
/// ConfigMerger::merge_into(&mut merged, &high);
/// assert_eq!(merged.cache_resolved, Some(false));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Fold `sources`, which must already be ordered lowest rank first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        sources.into_iter().fold(Config::default(), |mut merged, layer| {
            log::debug!(
                "applying {} (rank {})",
                layer.path.display(),
                layer.precedence
            );
            Self::merge_into(&mut merged, &layer.config);
            merged
        })
    }

    /// Apply `upper` on top of `base`. Switches set in `upper` win; its
    /// path definitions replace same-named ones and append the rest.
    pub fn merge_into(base: &mut Config, upper: &Config) {
        base.cache_resolved = upper.cache_resolved.or(base.cache_resolved);
        base.system_paths = upper.system_paths.or(base.system_paths);

        if let Some(paths) = &upper.paths {
            let merged = base.paths.get_or_insert_with(Vec::new);
            for definition in paths {
                match merged.iter_mut().find(|d| d.name == definition.name) {
                    Some(existing) => existing.clone_from(definition),
                    None => merged.push(definition.clone()),
                }
            }
        }
    }
}
