//! Scenario files: a page layout plus a script of user actions.
//!
//! ```toml
//! viewport_height = 800.0
//!
//! [[section]]
//! id = "home"
//! height = 800.0
//!
//! [[step]]
//! click = "projects"
//!
//! [[step]]
//! wait_ms = 600
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use folio_core::config::FolioConfig;
use folio_core::error::{FolioError, Result};
use folio_core::event::FormField;

fn default_viewport_height() -> f32 {
    800.0
}

fn default_frame_ms() -> u64 {
    16
}

/// A parsed scenario.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Fragment the page is opened with (deep link), e.g. `"#projects"`.
    #[serde(default)]
    pub initial_hash: String,
    /// Granularity of simulated time during waits.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Runtime overrides; unset fields keep their defaults.
    #[serde(default)]
    pub config: FolioConfig,
    #[serde(rename = "section")]
    pub sections: Vec<SectionSpec>,
    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

/// One laid-out section.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionSpec {
    pub id: String,
    pub height: f32,
    /// Lay the section out but leave it out of the DOM.
    #[serde(default)]
    pub unmounted: bool,
}

/// One scripted step. Exactly one action field must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub scroll_to: Option<f32>,
    pub click: Option<String>,
    pub wait_ms: Option<u64>,
    #[serde(default)]
    pub toggle_theme: bool,
    #[serde(default)]
    pub toggle_language: bool,
    #[serde(default)]
    pub toggle_menu: bool,
    pub input: Option<FieldInput>,
    #[serde(default)]
    pub submit: bool,
    #[serde(default)]
    pub unmount: bool,
}

/// Value typed into a contact form field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldInput {
    pub field: FormField,
    pub value: String,
}

/// The action a [`Step`] performs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ScrollTo(f32),
    Click(String),
    Wait(u64),
    ToggleTheme,
    ToggleLanguage,
    ToggleMenu,
    Input(FieldInput),
    Submit,
    Unmount,
}

impl Step {
    /// Resolve the step to its single action.
    pub fn action(&self) -> Result<Action> {
        let mut actions = Vec::new();
        if let Some(y) = self.scroll_to {
            actions.push(Action::ScrollTo(y));
        }
        if let Some(id) = &self.click {
            actions.push(Action::Click(id.clone()));
        }
        if let Some(ms) = self.wait_ms {
            actions.push(Action::Wait(ms));
        }
        if self.toggle_theme {
            actions.push(Action::ToggleTheme);
        }
        if self.toggle_language {
            actions.push(Action::ToggleLanguage);
        }
        if self.toggle_menu {
            actions.push(Action::ToggleMenu);
        }
        if let Some(input) = &self.input {
            actions.push(Action::Input(input.clone()));
        }
        if self.submit {
            actions.push(Action::Submit);
        }
        if self.unmount {
            actions.push(Action::Unmount);
        }

        match actions.len() {
            1 => Ok(actions.remove(0)),
            0 => Err(FolioError::Config("step has no action".into())),
            n => Err(FolioError::Config(format!(
                "step has {n} actions, expected exactly one"
            ))),
        }
    }
}

impl Scenario {
    pub fn from_toml(text: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml(&text)?;
        log::info!(
            "Loaded scenario {} ({} sections, {} steps)",
            path.display(),
            scenario.sections.len(),
            scenario.steps.len()
        );
        Ok(scenario)
    }

    /// Every step's action, in order.
    pub fn actions(&self) -> Result<Vec<Action>> {
        self.steps.iter().map(Step::action).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(FolioError::Config(
                "scenario needs at least one [[section]]".into(),
            ));
        }
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(FolioError::Config(format!(
                "viewport_height must be positive, got {}",
                self.viewport_height
            )));
        }
        self.config.validate()?;
        if self.frame_ms == 0 {
            return Err(FolioError::Config("frame_ms must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(FolioError::Config("section with empty id".into()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(FolioError::Config(format!(
                    "duplicate section `{}`",
                    section.id
                )));
            }
            if !section.height.is_finite() || section.height < 0.0 {
                return Err(FolioError::Config(format!(
                    "section `{}` has invalid height {}",
                    section.id, section.height
                )));
            }
        }

        // Surface bad steps at load time rather than mid-run.
        self.actions().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [[section]]
        id = "home"
        height = 800.0
    "#;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let s = Scenario::from_toml(MINIMAL).unwrap();
        assert_eq!(s.viewport_height, 800.0);
        assert_eq!(s.frame_ms, 16);
        assert_eq!(s.config, FolioConfig::default());
        assert!(s.steps.is_empty());
        assert!(s.initial_hash.is_empty());
    }

    #[test]
    fn steps_resolve_to_actions() {
        let text = r##"
            initial_hash = "#about"

            [config]
            hash_update_delay_ms = 300

            [[section]]
            id = "home"
            height = 800.0

            [[section]]
            id = "contact"
            height = 600.0
            unmounted = true

            [[step]]
            scroll_to = 450.0

            [[step]]
            click = "contact"

            [[step]]
            wait_ms = 600

            [[step]]
            toggle_language = true

            [[step]]
            input = { field = "email", value = "ada@example.com" }

            [[step]]
            submit = true
        "##;
        let s = Scenario::from_toml(text).unwrap();
        assert_eq!(s.config.hash_update_delay_ms, 300);
        assert!(s.sections[1].unmounted);
        assert_eq!(
            s.actions().unwrap(),
            vec![
                Action::ScrollTo(450.0),
                Action::Click("contact".into()),
                Action::Wait(600),
                Action::ToggleLanguage,
                Action::Input(FieldInput {
                    field: FormField::Email,
                    value: "ada@example.com".into(),
                }),
                Action::Submit,
            ]
        );
    }

    #[test]
    fn step_with_two_actions_is_rejected() {
        let text = format!("{MINIMAL}\n[[step]]\nclick = \"home\"\nwait_ms = 10\n");
        let err = Scenario::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("expected exactly one"));
    }

    #[test]
    fn empty_step_is_rejected() {
        let text = format!("{MINIMAL}\n[[step]]\ntoggle_theme = false\n");
        assert!(Scenario::from_toml(&text).is_err());
    }

    #[test]
    fn unknown_step_key_is_rejected() {
        let text = format!("{MINIMAL}\n[[step]]\nteleport = \"home\"\n");
        assert!(matches!(
            Scenario::from_toml(&text).unwrap_err(),
            FolioError::TomlParse(_)
        ));
    }

    #[test]
    fn layout_is_validated() {
        assert!(Scenario::from_toml("viewport_height = 800.0").is_err());
        let dup = format!("{MINIMAL}\n[[section]]\nid = \"home\"\nheight = 10.0\n");
        assert!(Scenario::from_toml(&dup).is_err());
        let negative = "[[section]]\nid = \"home\"\nheight = -1.0\n";
        assert!(Scenario::from_toml(negative).is_err());
        let zero_frame = format!("frame_ms = 0\n{MINIMAL}");
        assert!(Scenario::from_toml(&zero_frame).is_err());
    }

    #[test]
    fn bundled_tour_parses() {
        let s = Scenario::from_toml(include_str!("../scenarios/tour.toml")).unwrap();
        assert_eq!(s.sections.len(), 6);
        assert!(!s.actions().unwrap().is_empty());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.toml");
        std::fs::write(&path, MINIMAL).unwrap();
        assert_eq!(Scenario::load(&path).unwrap().sections[0].id, "home");
        assert!(Scenario::load(&dir.path().join("missing.toml")).is_err());
    }
}
