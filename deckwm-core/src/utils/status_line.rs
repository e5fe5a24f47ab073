//! Desktop summary written after every change, for panels to read.
use crate::errors::Result;
use crate::models::Handle;
use crate::state::State;
use std::fmt::Write as _;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes one status line per change. Lines identical to the previous one are skipped.
#[derive(Debug)]
pub struct StatusLine<W> {
    out: W,
    last_line: String,
}

impl<W: AsyncWrite + Unpin> StatusLine<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_line: String::new(),
        }
    }

    /// # Errors
    ///
    /// Will error if the line cannot be written or flushed.
    pub async fn write_state<H: Handle>(&mut self, state: &State<H>) -> Result<()> {
        let line = render(state);
        if line == self.last_line {
            return Ok(());
        }
        self.out.write_all(line.as_bytes()).await?;
        self.out.flush().await?;
        self.last_line = line;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// `desktop:clients:mode:is_current:has_urgent` for every desktop, then the title of the
/// current client when titles are enabled.
pub fn render<H: Handle>(state: &State<H>) -> String {
    let mut line = String::new();
    for number in 0..state.desktop_count() {
        let Some((_, display)) = state
            .hierarchy
            .find_desktop(number)
            .and_then(|desktop| state.hierarchy.top_display(desktop))
        else {
            continue;
        };
        let display = &state.hierarchy.displays[display];
        let ids = display.clients.iter(&state.hierarchy.clients);
        let (count, urgent) = ids.fold((0, false), |(count, urgent), id| {
            (count + 1, urgent || state.hierarchy.clients[id].urgent)
        });
        let _ = write!(
            line,
            "{}:{}:{}:{}:{} ",
            number,
            count,
            display.settings.layout.id(),
            u8::from(number == state.focus.number),
            u8::from(urgent),
        );
    }
    if state.output_title {
        if let Some(title) = state
            .current()
            .and_then(|id| state.client(id))
            .and_then(|client| client.name.as_deref())
        {
            line.push_str(title);
        }
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::state_with_clients;
    use crate::layouts::Layout;
    use crate::models::WindowHandle;

    #[test]
    fn every_desktop_gets_a_field_group() {
        let (mut state, ids) = state_with_clients(3);
        state.switch_mode(Layout::Grid);
        state.client_to_desktop(2);
        state.client_mut(ids[2]).unwrap().urgent = true;
        assert_eq!(render(&state), "0:2:3:1:0 1:0:0:0:0 2:1:0:0:1 3:0:0:0:0 \n");
    }

    #[test]
    fn the_title_follows_when_enabled() {
        let (mut state, _) = state_with_clients(1);
        state.title_change_handler(&WindowHandle(1), Some("vim".to_owned()));
        assert!(render(&state).ends_with(" \n"));
        state.output_title = true;
        assert!(render(&state).ends_with(" vim\n"));
    }

    #[tokio::test]
    async fn unchanged_lines_are_written_once() {
        let (mut state, _) = state_with_clients(1);
        let mut status = StatusLine::new(Vec::new());
        status.write_state(&state).await.unwrap();
        status.write_state(&state).await.unwrap();
        state.change_desktop(1);
        status.write_state(&state).await.unwrap();
        let written = String::from_utf8(status.into_inner()).unwrap();
        assert_eq!(
            written,
            "0:1:0:1:0 1:0:0:0:0 2:0:0:0:0 3:0:0:0:0 \n0:1:0:0:0 1:0:0:1:0 2:0:0:0:0 3:0:0:0:0 \n"
        );
    }
}
