//! The generic owning entity: a named object holding exactly one [`Config`],
//! per-field set hooks, and a "changed" notification channel.

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::config::{Config, ParamSet};
use crate::error::{ConfigError, Result};
use crate::event::{EventSource, Subscription};
use crate::value::Value;

/// Naming policy of the owning registry. The entity holds the factory as a
/// relation only; ownership runs the other way.
pub trait Factory {
    fn normalize_name(&self, name: &str) -> String;
}

/// Payload of the "changed" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: String,
    pub name: String,
}

/// Side-effecting per-field hook, invoked after the new value is stored.
pub type SetHook = Box<dyn FnMut(&Value)>;

pub struct Base {
    kind: &'static str,
    name: String,
    factory: Rc<dyn Factory>,
    config: Config,
    changed: EventSource<ChangeEvent>,
    hooks: HashMap<String, SetHook>,
    restore: bool,
    needs_sudo: bool,
}

impl Base {
    /// The config is instantiated immediately from the declared parameter
    /// set; the entity starts in the Normal (notifying) state.
    pub fn new(
        factory: Rc<dyn Factory>,
        kind: &'static str,
        name: impl Into<String>,
        params: Arc<ParamSet>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            factory,
            config: Config::new(params),
            changed: EventSource::new(),
            hooks: HashMap::new(),
            restore: false,
            needs_sudo: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Whether operating this entity requires elevated privilege.
    pub fn needs_sudo(&self) -> bool {
        self.needs_sudo
    }

    pub fn set_needs_sudo(&mut self, needs_sudo: bool) {
        self.needs_sudo = needs_sudo;
    }

    /// Enter or leave the Restoring state, which suppresses change
    /// notifications during bulk reconstruction.
    pub fn set_restore(&mut self, restore: bool) {
        self.restore = restore;
    }

    pub fn subscribe_changed(
        &mut self,
        subscriber: impl FnMut(&ChangeEvent) + 'static,
    ) -> Subscription {
        self.changed.subscribe(subscriber)
    }

    pub fn unsubscribe_changed(&mut self, subscription: Subscription) -> bool {
        self.changed.unsubscribe(subscription)
    }

    /// Register the per-field hook for a declared parameter, replacing any
    /// earlier registration for the same field.
    pub fn on_set(&mut self, name: &str, hook: impl FnMut(&Value) + 'static) -> Result<()> {
        if !self.config.params().contains(name) {
            return Err(ConfigError::UnknownParameter(name.to_owned()));
        }
        self.hooks.insert(name.to_owned(), Box::new(hook));
        Ok(())
    }

    /// Bulk-assign fields. Entries equal to the current value are skipped;
    /// each stored entry triggers its registered hook. One "changed"
    /// notification fires at the end if anything was stored, regardless of
    /// how many fields changed.
    pub fn set(&mut self, attrs: impl IntoIterator<Item = (String, Value)>) -> Result<()> {
        let mut any_changed = false;
        for (name, value) in attrs {
            let current = self
                .config
                .typed_value(&name)
                .ok_or_else(|| ConfigError::UnknownParameter(name.clone()))?;
            if *current == value {
                continue;
            }
            self.config.set(&name, value)?;
            if let Some(hook) = self.hooks.get_mut(&name)
                && let Some(stored) = self.config.typed_value(&name)
            {
                hook(stored);
            }
            any_changed = true;
        }
        if any_changed {
            self.notify_changed();
        }
        Ok(())
    }

    /// The typed value of a declared parameter.
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.config
            .typed_value(name)
            .ok_or_else(|| ConfigError::NoSuchOption {
                entity: self.name.clone(),
                option: name.to_owned(),
            })
    }

    /// Decode a persisted section into typed values (entity-aware) and apply
    /// it as a single bulk set, so a full load triggers at most one
    /// notification.
    pub fn load_from(&mut self, section: &[(String, String)]) -> Result<()> {
        let params = Arc::clone(self.config.params());
        let mut attrs = Vec::with_capacity(section.len());
        for (name, raw) in section {
            let param = params
                .get(name)
                .ok_or_else(|| ConfigError::UnknownParameter(name.clone()))?;
            attrs.push((name.clone(), param.from_string_brick(raw, self)?));
        }
        debug!(kind = self.kind, name = %self.name, entries = attrs.len(), "loading section");
        self.set(attrs)
    }

    /// Write this entity as a bracketed section: a `[<kind>:<name>]` header,
    /// one `name=value` line per parameter whose current value differs from
    /// its default (name-sorted, entity-aware serialization), then a blank
    /// separator line. The header is written even when every value is at
    /// its default.
    pub fn save_to<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut lines = Vec::new();
        for (name, param) in self.config.params().iter() {
            let current = self
                .config
                .typed_value(name)
                .ok_or_else(|| ConfigError::UnknownParameter(name.to_owned()))?;
            if *current != param.default_value() {
                lines.push(format!("{}={}", name, param.to_string_brick(current, self)?));
            }
        }
        writeln!(w, "[{}:{}]", self.kind, self.name)?;
        for line in &lines {
            writeln!(w, "{line}")?;
        }
        writeln!(w)?;
        Ok(())
    }

    /// Set the name directly, bypassing the factory's naming policy.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.notify_changed();
    }

    /// Rename through the owning factory's naming policy.
    pub fn rename(&mut self, name: &str) {
        let normalized = self.factory.normalize_name(name);
        self.set_name(normalized);
    }

    fn notify_changed(&mut self) {
        if self.restore {
            return;
        }
        debug!(kind = self.kind, name = %self.name, "changed");
        let event = ChangeEvent {
            kind: self.kind.to_owned(),
            name: self.name.clone(),
        };
        self.changed.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::{Boolean, Integer, Str};
    use std::cell::RefCell;

    struct StubFactory;

    impl Factory for StubFactory {
        fn normalize_name(&self, name: &str) -> String {
            name.trim().replace(' ', "_")
        }
    }

    fn tap_params() -> Arc<ParamSet> {
        ParamSet::builder()
            .param("count", Integer::new(0))
            .param("enabled", Boolean::new(false))
            .param("sock", Str::new(""))
            .build()
    }

    fn tap(name: &str) -> Base {
        Base::new(Rc::new(StubFactory), "tap", name, tap_params())
    }

    fn count_notifications(base: &mut Base) -> Rc<RefCell<u32>> {
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        base.subscribe_changed(move |_| *c.borrow_mut() += 1);
        count
    }

    #[test]
    fn config_seeded_from_declared_defaults() {
        let base = tap("t0");
        assert_eq!(base.get("count").unwrap(), &Value::Integer(0));
        assert_eq!(base.get("sock").unwrap(), &Value::String(String::new()));
    }

    #[test]
    fn set_to_current_value_does_not_notify() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.set([("count".to_owned(), Value::Integer(0))]).unwrap();
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn multi_field_set_notifies_once() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.set([
            ("count".to_owned(), Value::Integer(5)),
            ("enabled".to_owned(), Value::Bool(true)),
        ])
        .unwrap();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(base.get("count").unwrap(), &Value::Integer(5));
    }

    #[test]
    fn restoring_suppresses_notifications() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.set_restore(true);
        base.set([("count".to_owned(), Value::Integer(5))]).unwrap();
        base.rename("other");
        assert_eq!(*count.borrow(), 0);

        base.set_restore(false);
        base.set([("count".to_owned(), Value::Integer(6))]).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn set_hook_sees_the_stored_value() {
        let mut base = tap("t0");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        base.on_set("sock", move |v| s.borrow_mut().push(v.clone()))
            .unwrap();

        base.set([("sock".to_owned(), Value::String("vde.sock".into()))])
            .unwrap();
        // Unchanged assignment: hook must not fire again.
        base.set([("sock".to_owned(), Value::String("vde.sock".into()))])
            .unwrap();
        assert_eq!(*seen.borrow(), vec![Value::String("vde.sock".into())]);
    }

    #[test]
    fn on_set_rejects_undeclared_field() {
        let mut base = tap("t0");
        assert!(matches!(
            base.on_set("bogus", |_| {}).unwrap_err(),
            ConfigError::UnknownParameter(n) if n == "bogus"
        ));
    }

    #[test]
    fn set_of_undeclared_field_fails() {
        let mut base = tap("t0");
        let err = base
            .set([("bogus".to_owned(), Value::Integer(1))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter(_)));
    }

    #[test]
    fn get_miss_names_the_entity() {
        let base = tap("mytap");
        let err = base.get("bogus").unwrap_err();
        assert_eq!(err.to_string(), "mytap config has no bogus option");
    }

    #[test]
    fn rename_normalizes_and_notifies() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.rename("  my tap ");
        assert_eq!(base.name(), "my_tap");
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn save_emits_only_non_default_values_sorted() {
        let mut base = tap("mytap");
        base.set([
            ("enabled".to_owned(), Value::Bool(true)),
            ("count".to_owned(), Value::Integer(5)),
        ])
        .unwrap();

        let mut out = Vec::new();
        base.save_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[tap:mytap]\ncount=5\nenabled=*\n\n"
        );
    }

    #[test]
    fn save_of_all_defaults_is_header_only() {
        let base = tap("t0");
        let mut out = Vec::new();
        base.save_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[tap:t0]\n\n");
    }

    #[test]
    fn load_applies_section_with_one_notification() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.load_from(&[
            ("count".to_owned(), "5".to_owned()),
            ("enabled".to_owned(), "*".to_owned()),
        ])
        .unwrap();
        assert_eq!(base.get("count").unwrap(), &Value::Integer(5));
        assert_eq!(base.get("enabled").unwrap(), &Value::Bool(true));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn load_of_empty_section_keeps_defaults_silently() {
        let mut base = tap("t0");
        let count = count_notifications(&mut base);
        base.load_from(&[]).unwrap();
        assert_eq!(base.get("count").unwrap(), &Value::Integer(0));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn save_load_roundtrip_on_fresh_entity() {
        let mut source = tap("t0");
        source
            .set([("count".to_owned(), Value::Integer(7))])
            .unwrap();

        let mut out = Vec::new();
        source.save_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let pairs: Vec<(String, String)> = text
            .lines()
            .filter_map(crate::section::parse_assignment)
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        let mut fresh = tap("t1");
        fresh.load_from(&pairs).unwrap();
        assert_eq!(fresh.get("count").unwrap(), &Value::Integer(7));
        assert_eq!(fresh.get("enabled").unwrap(), &Value::Bool(false));
    }

    #[test]
    fn needs_sudo_defaults_false() {
        let mut base = tap("t0");
        assert!(!base.needs_sudo());
        base.set_needs_sudo(true);
        assert!(base.needs_sudo());
    }
}
