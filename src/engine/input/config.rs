// Input binding configuration and remapping

use super::action::{Action, PhysicalInput};
use std::collections::HashMap;

/// Maps physical inputs to logical actions
///
/// One physical input may drive several actions and one action may be driven by
/// several physical inputs; the logical state is the OR of all of them.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Physical input -> actions it drives
    bindings: HashMap<PhysicalInput, Vec<Action>>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<PhysicalInput>>,
}

impl InputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the default bindings
    pub fn with_defaults() -> Self {
        Self::from_bindings(super::action::default_bindings())
    }

    pub fn from_bindings(bindings: Vec<(PhysicalInput, Action)>) -> Self {
        let mut config = Self::new();
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Bind a physical input to an action (additive)
    pub fn bind(&mut self, source: PhysicalInput, action: Action) {
        let actions = self.bindings.entry(source).or_default();
        if actions.contains(&action) {
            return;
        }
        actions.push(action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Replace whatever `source` drove with a single action
    pub fn rebind(&mut self, source: PhysicalInput, action: Action) {
        self.unbind_source(source);
        self.bind(source, action);
    }

    /// Remove every action bound to a physical input
    pub fn unbind_source(&mut self, source: PhysicalInput) {
        if let Some(actions) = self.bindings.remove(&source) {
            for action in actions {
                if let Some(sources) = self.action_to_sources.get_mut(&action) {
                    sources.retain(|s| *s != source);
                    if sources.is_empty() {
                        self.action_to_sources.remove(&action);
                    }
                }
            }
        }
    }

    /// Remove every physical input bound to an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                if let Some(actions) = self.bindings.get_mut(&source) {
                    actions.retain(|a| *a != action);
                    if actions.is_empty() {
                        self.bindings.remove(&source);
                    }
                }
            }
        }
    }

    /// Actions driven by a physical input
    pub fn actions_for(&self, source: PhysicalInput) -> &[Action] {
        self.bindings
            .get(&source)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Physical inputs bound to an action
    pub fn sources_for(&self, action: Action) -> &[PhysicalInput] {
        self.action_to_sources
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_bound(&self, source: PhysicalInput) -> bool {
        self.bindings.contains_key(&source)
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::with_defaults();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new();
        let source = PhysicalInput::key(KeyCode::KeyA);
        config.bind(source, Action::MoveLeft);

        assert_eq!(config.actions_for(source), &[Action::MoveLeft]);
        assert_eq!(config.sources_for(Action::MoveLeft), &[source]);
    }

    #[test]
    fn test_one_source_many_actions() {
        let mut config = InputConfig::new();
        let source = PhysicalInput::key(KeyCode::KeyS);
        config.bind(source, Action::Slide);
        config.bind(source, Action::Down);
        config.bind(source, Action::Down);

        assert_eq!(config.actions_for(source), &[Action::Slide, Action::Down]);
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::new();
        let source = PhysicalInput::key(KeyCode::KeyS);
        config.bind(source, Action::Slide);
        config.bind(source, Action::Down);
        config.unbind_source(source);

        assert!(config.actions_for(source).is_empty());
        assert!(!config.has_binding(Action::Slide));
        assert!(!config.has_binding(Action::Down));
    }

    #[test]
    fn test_unbind_action_keeps_other_actions() {
        let mut config = InputConfig::new();
        let source = PhysicalInput::key(KeyCode::KeyS);
        config.bind(source, Action::Slide);
        config.bind(source, Action::Down);
        config.unbind_action(Action::Down);

        assert_eq!(config.actions_for(source), &[Action::Slide]);
        assert!(config.sources_for(Action::Down).is_empty());
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new();
        let source = PhysicalInput::key(KeyCode::KeyA);

        config.bind(source, Action::MoveLeft);
        config.rebind(source, Action::MoveRight);

        assert_eq!(config.actions_for(source), &[Action::MoveRight]);
        assert!(!config.has_binding(Action::MoveLeft));
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::new();
        config.bind(PhysicalInput::key(KeyCode::KeyZ), Action::MoveLeft);
        config.reset_to_defaults();

        assert!(!config.is_bound(PhysicalInput::key(KeyCode::KeyZ)));
        assert!(config.has_binding(Action::Jump));
        assert!(config.has_binding(Action::Slide));
    }
}
