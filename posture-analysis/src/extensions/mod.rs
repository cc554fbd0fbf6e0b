//! Extension points for rules shipped outside the built-in catalog.
//!
//! Extensions contribute rules under their own id namespace (anything but
//! the built-in `AP` prefix) and receive scan lifecycle notifications.
//! Contributed rules only take effect while their providing extension is
//! registered and reports itself licensed.

use std::sync::Arc;

use tracing::{debug, info, warn};

use posture_core::models::ScanResult;

use crate::rules::{RuleEngine, SecurityRule};

/// A pluggable analysis extension.
pub trait Extension: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn version(&self) -> &str;

    /// Whether this extension's rules may run. Defaults to inactive so an
    /// extension must opt in explicitly.
    fn licensed(&self) -> bool {
        false
    }

    fn on_scan_start(&self, _project_path: &str) {}

    fn on_scan_complete(&self, _result: &ScanResult) {}
}

/// Registered extensions and the rules they contributed.
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn Extension>>,
    rules: Vec<(String, Arc<dyn SecurityRule>)>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_extension(&mut self, extension: Arc<dyn Extension>) {
        info!(
            extension = extension.id(),
            version = extension.version(),
            "registering extension"
        );
        self.extensions.retain(|e| e.id() != extension.id());
        self.extensions.push(extension);
    }

    /// Remove an extension and every rule it contributed.
    pub fn unregister_extension(&mut self, extension_id: &str) {
        self.extensions.retain(|e| e.id() != extension_id);
        self.rules.retain(|(owner, _)| owner != extension_id);
    }

    /// Attach a rule to a registered extension. Rules registered under an
    /// unknown extension id are kept but stay dormant until the extension
    /// itself registers.
    pub fn register_rule(&mut self, extension_id: &str, rule: Arc<dyn SecurityRule>) {
        debug!(extension = extension_id, rule = rule.id(), "registering extension rule");
        self.rules.push((extension_id.to_string(), rule));
    }

    pub fn extensions(&self) -> impl Iterator<Item = &dyn Extension> {
        self.extensions.iter().map(|e| e.as_ref())
    }

    pub fn extension(&self, extension_id: &str) -> Option<&dyn Extension> {
        self.extensions
            .iter()
            .find(|e| e.id() == extension_id)
            .map(|e| e.as_ref())
    }

    /// Rules whose providing extension is registered and licensed, in
    /// registration order.
    pub fn licensed_rules(&self) -> Vec<Arc<dyn SecurityRule>> {
        self.rules
            .iter()
            .filter(|(owner, _)| {
                self.extension(owner).map(|e| e.licensed()).unwrap_or(false)
            })
            .map(|(_, rule)| Arc::clone(rule))
            .collect()
    }

    /// Append every licensed extension rule after the engine's current
    /// catalog. Rules clashing with an already registered id are skipped.
    pub fn install_into(&self, engine: &mut RuleEngine) {
        for rule in self.licensed_rules() {
            if let Err(error) = engine.add_rule(rule) {
                warn!(error = %error, "skipping extension rule");
            }
        }
    }

    pub fn notify_scan_start(&self, project_path: &str) {
        for extension in &self.extensions {
            extension.on_scan_start(project_path);
        }
    }

    pub fn notify_scan_complete(&self, result: &ScanResult) {
        for extension in &self.extensions {
            extension.on_scan_complete(result);
        }
    }
}
