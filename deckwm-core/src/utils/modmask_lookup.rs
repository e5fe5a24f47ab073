//! Modifier and pointer button masks, independent of the display server's encoding.
use bitflags::bitflags;
use serde::{de::Visitor, Deserialize, Serialize};

bitflags! {
    /// Modifier keys held during a key or button press.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ModMask: u16 {
        const Zero = 0;
        const Shift = 1;
        const CapsLock = 1 << 1;
        const Control = 1 << 2;
        /// Mod1
        const Alt = 1 << 3;
        /// Mod2
        const NumLock = 1 << 4;
        const Mod3 = 1 << 5;
        /// Mod4
        const Super = 1 << 6;
        const Mod5 = 1 << 7;
    }
}

bitflags! {
    /// Pointer buttons.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Button: u8 {
        const Zero = 0;
        const Button1 = 1;
        const Button2 = 1 << 1;
        const Button3 = 1 << 2;
        /// Scroll up
        const Button4 = 1 << 3;
        /// Scroll down
        const Button5 = 1 << 4;
    }
}

impl Button {
    /// Maps a 1-based button number to its flag.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        match number {
            1..=5 => Self::from_bits_retain(1 << (number - 1)),
            _ => Self::Zero,
        }
    }

    /// Inverse of [`Button::from_number`]. `0` for anything but a single button.
    #[must_use]
    pub fn number(&self) -> u32 {
        if self.bits().count_ones() == 1 {
            self.bits().trailing_zeros() + 1
        } else {
            0
        }
    }
}

/// Drops the lock modifiers so bindings match whatever the lock state.
#[must_use]
pub fn clean(mask: ModMask) -> ModMask {
    mask.difference(ModMask::NumLock | ModMask::CapsLock)
}

/// Combines modifier names from the configuration into a mask.
#[must_use]
pub fn into_modmask(keys: &[String]) -> ModMask {
    let mask = keys
        .iter()
        .fold(ModMask::Zero, |mask, key| mask | into_mod(key));
    clean(mask)
}

#[must_use]
pub fn into_mod(key: &str) -> ModMask {
    match key {
        "Shift" => ModMask::Shift,
        "Control" | "Ctrl" => ModMask::Control,
        "Mod1" | "Alt" => ModMask::Alt,
        "Mod3" => ModMask::Mod3,
        "Mod4" | "Super" => ModMask::Super,
        "Mod5" => ModMask::Mod5,
        _ => ModMask::Zero,
    }
}

// bitflags types get their serde impls by hand

impl Serialize for Button {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Button {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ButtonVisitor;

        impl Visitor<'_> for ButtonVisitor {
            type Value = Button;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a button bitfield")
            }

            fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(Button::from_bits_retain(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u8::try_from(v)
                    .map(Button::from_bits_retain)
                    .map_err(|_| E::custom(format!("button mask out of range: {v}")))
            }
        }

        deserializer.deserialize_u8(ButtonVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_names_combine() {
        let keys = vec!["Mod4".to_string(), "Shift".to_string(), "Hyper".to_string()];
        assert_eq!(into_modmask(&keys), ModMask::Super | ModMask::Shift);
    }

    #[test]
    fn lock_keys_do_not_matter() {
        let held = ModMask::Control | ModMask::NumLock | ModMask::CapsLock;
        assert_eq!(clean(held), ModMask::Control);
    }

    #[test]
    fn buttons_map_to_numbers_and_back() {
        assert_eq!(Button::from_number(3), Button::Button3);
        assert_eq!(Button::Button3.number(), 3);
        assert_eq!(Button::from_number(9), Button::Zero);
        assert_eq!((Button::Button1 | Button::Button2).number(), 0);
    }

    #[test]
    fn buttons_survive_json() {
        let json = serde_json::to_string(&Button::Button5).unwrap();
        assert_eq!(json, "16");
        let back: Button = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Button::Button5);
    }
}
