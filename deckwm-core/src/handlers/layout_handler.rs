use crate::display_action::DisplayAction;
use crate::layouts::Layout;
use crate::models::{ClientId, Handle, Xyhw};
use crate::state::State;

impl<H: Handle> State<H> {
    /// Arranges the tileable clients of the current display.
    pub fn tile(&mut self) {
        if !self.show {
            return;
        }
        let display = self.display();
        let settings = display.settings;
        let tiled: Vec<ClientId> = display
            .clients
            .iter(&self.hierarchy.clients)
            .filter(|id| self.hierarchy.clients[*id].is_tileable())
            .collect();
        let borders: Vec<i32> = tiled.iter().map(|id| self.border_of(*id)).collect();
        let area = self.layout_area(&settings);
        let geometries = settings.layout.arrange(&area, &borders);
        for (id, geometry) in tiled.into_iter().zip(geometries) {
            self.move_resize_client(id, geometry);
        }
    }

    /// Switches the current display to `layout`. Choosing the active layout again tiles every
    /// floating client.
    pub fn switch_mode(&mut self, layout: Layout) -> Option<bool> {
        if !self.show {
            self.show_hide();
        }
        if self.display().settings.layout == layout {
            for id in self.hierarchy.client_ids(self.focus.display) {
                self.unfloat_client(id);
            }
        }
        self.display_mut().settings.layout = layout;
        self.tile();
        self.update_current(self.current());
        Some(true)
    }

    pub fn rotate_mode(&mut self, delta: i32) -> Option<bool> {
        let layout = self.display().settings.layout.rotate(delta);
        if !self.show {
            self.show_hide();
        }
        self.display_mut().settings.layout = layout;
        self.tile();
        self.update_current(self.current());
        Some(true)
    }

    /// Grows or shrinks the master area by `delta` pixels. Refused when the master or the rest
    /// would fall below the minimum window size.
    pub fn resize_master(&mut self, delta: i32) -> Option<bool> {
        let settings = self.display().settings;
        let base = if settings.layout == Layout::BottomStack {
            self.wh()
        } else {
            self.ww()
        };
        let area = self.layout_area(&settings);
        let size = area.master_extent(base) + delta;
        if size < self.min_window_size || base - size < self.min_window_size {
            tracing::trace!("Refusing to resize the master area to {size}");
            return None;
        }
        self.display_mut().settings.master_size += delta;
        self.tile();
        Some(true)
    }

    pub fn resize_stack(&mut self, delta: i32) -> Option<bool> {
        self.display_mut().settings.growth += delta;
        self.tile();
        Some(true)
    }

    /// Changes the gaps of the current display, or of every display when gaps are global.
    pub fn adjust_gaps(&mut self, delta: i32) -> Option<bool> {
        let gaps = self.display().settings.gaps + delta;
        if gaps < 0 {
            return None;
        }
        if self.global_gaps {
            for display in self.hierarchy.displays.values_mut() {
                display.settings.gaps = gaps;
            }
        } else {
            self.display_mut().settings.gaps = gaps;
        }
        self.tile();
        Some(true)
    }

    pub fn adjust_borders(&mut self, delta: i32) -> Option<bool> {
        let width = self.border_width + delta;
        if width < 0 {
            return None;
        }
        self.border_width = width;
        self.tile();
        self.update_current(self.current());
        Some(true)
    }

    pub fn invert_stack(&mut self) -> Option<bool> {
        let settings = &mut self.display_mut().settings;
        settings.invert = !settings.invert;
        self.tile();
        Some(true)
    }

    pub fn toggle_panel(&mut self) -> Option<bool> {
        let settings = &mut self.display_mut().settings;
        settings.show_panel = !settings.show_panel;
        self.tile();
        Some(true)
    }

    /// Moves every client of the current display off screen, or brings them back.
    pub fn show_hide(&mut self) -> Option<bool> {
        self.show = !self.show;
        if self.show {
            self.show_display(self.focus.display);
            self.tile();
        } else {
            self.hide_display(self.focus.display);
        }
        Some(true)
    }

    pub fn toggle_maximize(&mut self) -> Option<bool> {
        let current = self.current()?;
        let maximized = self.client(current)?.maximized;
        self.set_maximize(current, !maximized)
    }

    /// Maximized clients cover the usable area, gaps and borders kept.
    pub fn set_maximize(&mut self, id: ClientId, maximize: bool) -> Option<bool> {
        let client = self.client(id)?;
        if client.fullscreen {
            return None;
        }
        let handle = client.handle;
        let settings = self.display().settings;
        let border = self.border_of(id);
        self.actions
            .push_back(DisplayAction::SetBorderWidth(handle, border));
        if maximize {
            let area = self.layout_area(&settings);
            let gaps = settings.gaps;
            let geometry = Xyhw::new(
                gaps,
                area.top + gaps,
                self.ww() - 2 * (border + gaps),
                self.wh() - 2 * (border + gaps),
            );
            self.move_resize_client(id, geometry);
        }
        self.client_mut(id)?.maximized = maximize;
        self.update_current(Some(id));
        Some(true)
    }

    /// Makes a client float, giving it back the size it had when it was last tiled.
    pub fn float_client(&mut self, id: ClientId) {
        let min = self.min_window_size;
        let Some(client) = self.client_mut(id) else {
            return;
        };
        client.floating = true;
        if let Some((w, h)) = client.float_size {
            let (w, h) = (w.max(min), h.max(min));
            client.geometry.w = w;
            client.geometry.h = h;
            let handle = client.handle;
            self.actions
                .push_back(DisplayAction::ResizeWindow(handle, w, h));
        }
    }

    /// Returns a client to the layout, remembering its floating size.
    pub fn unfloat_client(&mut self, id: ClientId) {
        if let Some(client) = self.client_mut(id) {
            client.floating = false;
            client.float_size = Some((client.geometry.w, client.geometry.h));
        }
    }

    fn float_current(&mut self) -> Option<ClientId> {
        let current = self.current()?;
        if !self.client(current)?.floating {
            self.float_client(current);
            self.tile();
        }
        Some(current)
    }

    pub fn float_x(&mut self, delta: i32) -> Option<bool> {
        self.float_by(delta, 0)
    }

    pub fn float_y(&mut self, delta: i32) -> Option<bool> {
        self.float_by(0, delta)
    }

    fn float_by(&mut self, dx: i32, dy: i32) -> Option<bool> {
        if dx == 0 && dy == 0 {
            return None;
        }
        let current = self.float_current()?;
        let Xyhw { x, y, .. } = self.client(current)?.geometry;
        self.move_client(current, x + dx, y + dy);
        Some(true)
    }

    pub fn resize_x(&mut self, delta: i32) -> Option<bool> {
        self.resize_by(delta, 0)
    }

    pub fn resize_y(&mut self, delta: i32) -> Option<bool> {
        self.resize_by(0, delta)
    }

    fn resize_by(&mut self, dw: i32, dh: i32) -> Option<bool> {
        if dw == 0 && dh == 0 {
            return None;
        }
        let current = self.float_current()?;
        let geometry = self.client(current)?.geometry;
        let (w, h) = (geometry.w + dw, geometry.h + dh);
        if w < self.min_window_size || h < self.min_window_size || w <= 0 || h <= 0 {
            return None;
        }
        self.move_resize_client(current, Xyhw { w, h, ..geometry });
        Some(true)
    }

    /// Floats the current client and puts it in the middle of the monitor.
    pub fn center_window(&mut self) -> Option<bool> {
        let current = self.current()?;
        let client = self.client(current)?;
        if !client.floating && !client.transient {
            self.float_client(current);
            self.tile();
        }
        self.center_floating(current);
        Some(true)
    }

    pub(crate) fn center_floating(&mut self, id: ClientId) {
        let Some(client) = self.client(id) else {
            return;
        };
        if !client.floating {
            return;
        }
        let handle = client.handle;
        let border = client.border_width.unwrap_or(self.border_width);
        let centered = client.geometry.centered_in(self.ww(), self.wh(), border);
        self.actions.push_back(DisplayAction::Raise(handle));
        self.move_client(id, centered.x, centered.y);
    }

    /// Puts a floating client back into the layout.
    pub fn tilemize(&mut self) -> Option<bool> {
        let current = self.current()?;
        if !self.client(current)?.floating {
            return None;
        }
        self.unfloat_client(current);
        self.update_current(Some(current));
        Some(true)
    }
}
