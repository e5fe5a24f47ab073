//! Xlib calls related to a keyboard.
use super::XlibError;
use crate::XWrap;
use deckwm_core::Command;
use std::ffi::CString;
use std::os::raw::c_uint;
use x11_dl::xlib;

/// The modifier bits of a key event, without numlock, capslock and the pointer buttons.
pub const fn clean_mask(state: c_uint) -> c_uint {
    state
        & !(xlib::Mod2Mask | xlib::LockMask)
        & (xlib::ShiftMask
            | xlib::ControlMask
            | xlib::Mod1Mask
            | xlib::Mod3Mask
            | xlib::Mod4Mask
            | xlib::Mod5Mask)
}

impl XWrap {
    /// Looks up a key name such as `Return` or `j`.
    // `XStringToKeysym`: https://tronche.com/gui/x/xlib/utilities/keyboard/XStringToKeysym.html
    #[must_use]
    pub fn into_keysym(&self, key: &str) -> Option<xlib::KeySym> {
        let name = CString::new(key).ok()?;
        let keysym = unsafe { (self.xlib.XStringToKeysym)(name.as_ptr()) };
        (keysym != 0).then_some(keysym)
    }

    /// Grabs the keysym with the modifier on the root.
    // `XKeysymToKeycode`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToKeycode.html
    // `XGrabKey`: https://tronche.com/gui/x/xlib/input/XGrabKey.html
    pub fn grab_keys(&self, keysym: xlib::KeySym, modifiers: c_uint) {
        let code = unsafe { (self.xlib.XKeysymToKeycode)(self.display, keysym) };
        if code == 0 {
            tracing::debug!("Keysym {} has no keycode on this keyboard", keysym);
            return;
        }
        // Grab the keys with and without numlock (Mod2).
        let mods = [
            modifiers,
            modifiers | xlib::Mod2Mask,
            modifiers | xlib::LockMask,
            modifiers | xlib::Mod2Mask | xlib::LockMask,
        ];
        for m in &mods {
            unsafe {
                (self.xlib.XGrabKey)(
                    self.display,
                    i32::from(code),
                    *m,
                    self.root,
                    1,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                );
            }
        }
    }

    /// Drops every key grab and grabs the configured bindings again.
    // `XUngrabKey`: https://tronche.com/gui/x/xlib/input/XUngrabKey.html
    pub fn reset_grabs(&self) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }
        for grab in &self.keygrabs {
            self.grab_keys(grab.keysym, grab.mask);
        }
    }

    /// Updates the keyboard mapping.
    /// # Errors
    ///
    /// Will error if updating the keyboard failed.
    // `XRefreshKeyboardMapping`: https://tronche.com/gui/x/xlib/utilities/keyboard/XRefreshKeyboardMapping.html
    pub fn refresh_keyboard(&self, evt: &mut xlib::XMappingEvent) -> Result<(), XlibError> {
        let status = unsafe { (self.xlib.XRefreshKeyboardMapping)(evt) };
        if status == 0 {
            Err(XlibError::FailedStatus)
        } else {
            Ok(())
        }
    }

    /// Converts a keycode to a keysym.
    // `XkbKeycodeToKeysym`: https://linux.die.net/man/3/xkbkeycodetokeysym
    #[must_use]
    pub fn keycode_to_keysym(&self, keycode: c_uint) -> xlib::KeySym {
        unsafe { (self.xlib.XkbKeycodeToKeysym)(self.display, keycode as u8, 0, 0) }
    }

    /// The command bound to a key press.
    #[must_use]
    pub fn command_for(&self, state: c_uint, keycode: c_uint) -> Option<Command> {
        let keysym = self.keycode_to_keysym(keycode);
        let mask = clean_mask(state);
        self.keygrabs
            .iter()
            .find(|grab| grab.keysym == keysym && grab.mask == mask)
            .map(|grab| grab.command.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_modifiers_and_buttons_are_ignored() {
        let state = xlib::Mod4Mask | xlib::Mod2Mask | xlib::LockMask | xlib::Button1Mask;
        assert_eq!(clean_mask(state), xlib::Mod4Mask);
        assert_eq!(
            clean_mask(xlib::ShiftMask | xlib::ControlMask),
            xlib::ShiftMask | xlib::ControlMask
        );
    }
}
