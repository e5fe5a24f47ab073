use deckwm_core::Command;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keybind {
    pub modifier: Option<Modifier>,
    pub key: String,
    pub command: Command,
}

impl Keybind {
    pub fn new(modifier: &[&str], key: &str, command: Command) -> Self {
        Self {
            modifier: Some(Modifier::List(
                modifier.iter().map(|m| (*m).to_owned()).collect(),
            )),
            key: key.to_owned(),
            command,
        }
    }

    pub fn to_core_keybind(&self, modkey: &str) -> deckwm_core::Keybind {
        deckwm_core::Keybind {
            modifier: self
                .modifier
                .as_ref()
                .map(|modifier| modifier.substitute(modkey).into())
                .unwrap_or_default(),
            key: self.key.clone(),
            command: self.command.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }

    /// Replaces the `modkey` placeholder with the configured modifier.
    #[must_use]
    pub fn substitute(&self, modkey: &str) -> Self {
        let swap = |m: &String| {
            if m == "modkey" {
                modkey.to_owned()
            } else {
                m.clone()
            }
        };
        match self {
            Self::Single(m) => Self::Single(swap(m)),
            Self::List(ms) => Self::List(ms.iter().map(swap).collect()),
        }
    }

    pub fn sort_unstable(&mut self) {
        match self {
            Self::Single(_) => {}
            Self::List(modifiers) => modifiers.sort_unstable(),
        }
    }
}

impl std::convert::From<Modifier> for Vec<String> {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Single(modifier) if modifier.is_empty() => vec![],
            Modifier::Single(modifier) => vec![modifier],
            Modifier::List(modifiers) => modifiers,
        }
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self.clone()).into_iter()
    }
}

impl std::convert::From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}
