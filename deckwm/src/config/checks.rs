use super::Config;
use deckwm_core::utils::modmask_lookup::{self, ModMask};
use std::collections::HashMap;

impl Config {
    pub fn check_mousekey(&self) -> Option<String> {
        if self.mousekey.is_empty() {
            return Some(
                "Your mousekey is set to nothing, this will cause windows to move/resize with just a mouse press."
                    .to_owned(),
            );
        }
        None
    }

    /// Check all keybinds for unknown modifiers, missing keys and combinations bound twice.
    pub fn check_keybinds(&self) -> Vec<String> {
        let mut returns = Vec::new();
        let mut bindings = HashMap::new();
        for keybind in &self.keybind {
            let mut modkey = keybind
                .modifier
                .clone()
                .unwrap_or_else(|| "".into())
                .substitute(&self.modkey);
            for m in &modkey {
                if modmask_lookup::into_mod(&m) == ModMask::Zero {
                    returns.push(format!("Modifier `{m}` is not valid for key `{}`", keybind.key));
                }
            }
            if keybind.key.is_empty() {
                returns.push(format!("Keybind for {:?} has no key", keybind.command));
            }

            modkey.sort_unstable();
            if let Some(conflict) =
                bindings.insert((modkey.clone(), keybind.key.clone()), &keybind.command)
            {
                returns.push(format!(
                    "Multiple commands bound to key combination {} + {}: {:?} and {:?}",
                    modkey, keybind.key, conflict, keybind.command
                ));
            }
        }
        returns
    }
}

#[cfg(test)]
mod tests {
    use super::super::Keybind;
    use super::*;
    use deckwm_core::Command;

    #[test]
    fn the_default_bindings_are_clean() {
        let config = Config::default();
        assert_eq!(config.check_keybinds(), Vec::<String>::new());
        assert!(config.check_mousekey().is_none());
    }

    #[test]
    fn conflicts_and_bad_modifiers_are_reported() {
        let config = Config {
            keybind: vec![
                Keybind::new(&["modkey", "Shift"], "q", Command::Quit),
                Keybind::new(&["Shift", "Mod4"], "q", Command::KillClient),
                Keybind::new(&["Hyper"], "x", Command::ShowHide),
            ],
            ..Config::default()
        };
        let problems = config.check_keybinds();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].starts_with("Multiple commands"));
        assert!(problems[1].contains("`Hyper`"));
    }
}
