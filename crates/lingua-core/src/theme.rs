use lingua_types::{Appearance, Theme};

/// Tri-state display preference. `system` resolves against the last
/// observed OS preference, fed in by whoever owns the OS subscription.
#[derive(Debug)]
pub struct ThemeController {
    preference: Theme,
    system_dark: bool,
}

impl ThemeController {
    pub fn new(preference: Theme) -> Self {
        Self {
            preference,
            system_dark: false,
        }
    }

    pub fn preference(&self) -> Theme {
        self.preference
    }

    pub fn set_preference(&mut self, preference: Theme) {
        self.preference = preference;
    }

    /// Toggle order: system -> light -> dark -> system.
    pub fn cycle(&mut self) -> Theme {
        self.preference = match self.preference {
            Theme::System => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
        };
        self.preference
    }

    /// The OS subscription should exist exactly while this is true.
    pub fn wants_system_watch(&self) -> bool {
        self.preference == Theme::System
    }

    pub fn observe_system(&mut self, dark: bool) {
        self.system_dark = dark;
    }

    pub fn effective(&self) -> Appearance {
        match self.preference {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::System => {
                if self.system_dark {
                    Appearance::Dark
                } else {
                    Appearance::Light
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_follows_system_light_dark_order() {
        let mut controller = ThemeController::new(Theme::System);
        assert_eq!(controller.cycle(), Theme::Light);
        assert_eq!(controller.cycle(), Theme::Dark);
        assert_eq!(controller.cycle(), Theme::System);
    }

    #[test]
    fn system_preference_tracks_os_appearance() {
        let mut controller = ThemeController::new(Theme::System);
        assert_eq!(controller.effective(), Appearance::Light);

        controller.observe_system(true);
        assert_eq!(controller.effective(), Appearance::Dark);

        // explicit preferences ignore the OS value
        controller.set_preference(Theme::Light);
        assert_eq!(controller.effective(), Appearance::Light);
        assert!(!controller.wants_system_watch());
    }

    #[test]
    fn watch_is_wanted_only_in_system_mode() {
        let mut controller = ThemeController::new(Theme::Light);
        assert!(!controller.wants_system_watch());
        controller.set_preference(Theme::System);
        assert!(controller.wants_system_watch());
    }
}
