//! Plain (non-command) input handling for the dashboard front end.

use crate::client::Backend;
use crate::session::Session;
use crate::types::{FileHandle, Mode};

/// Stores a line of plain input in the active mode's buffer.
///
/// Chat text and repository URLs are kept exactly as typed. In file mode the
/// line is a whitespace-separated list of paths that replaces the selection.
pub fn fill_active_buffer<B: Backend>(session: &mut Session<B>, line: &str) {
    match session.state().active_mode() {
        Mode::Chat => session.set_chat_input(line),
        Mode::RepositoryReview => session.set_repository_url(line),
        Mode::FileAnalysis => {
            session.select_files(line.split_whitespace().map(FileHandle::from_path).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::types::BackendCall;

    struct Unreachable;

    #[async_trait::async_trait]
    impl Backend for Unreachable {
        async fn execute(&self, _call: BackendCall) -> Result<String> {
            Err(Error::transport("not connected", None))
        }
    }

    #[test]
    fn chat_input_keeps_surrounding_whitespace() {
        let mut session = Session::new(Unreachable);
        fill_active_buffer(&mut session, "  indented question  ");
        assert_eq!(session.state().chat_input(), "  indented question  ");
    }

    #[test]
    fn repository_url_is_kept_verbatim() {
        let mut session = Session::new(Unreachable);
        session.set_mode(Mode::RepositoryReview);
        fill_active_buffer(&mut session, " https://github.com/u/r ");
        assert_eq!(session.state().repository_url(), " https://github.com/u/r ");
        assert_eq!(session.state().chat_input(), "");
    }

    #[test]
    fn file_mode_replaces_selection_in_order() {
        let mut session = Session::new(Unreachable);
        session.set_mode(Mode::FileAnalysis);
        session.add_file(FileHandle::from_bytes("old.py", "x"));
        fill_active_buffer(&mut session, "  src/a.py\tlib/b.rs ");
        let names: Vec<_> = session
            .state()
            .selected_files()
            .iter()
            .map(FileHandle::name)
            .collect();
        assert_eq!(names, vec!["a.py", "b.rs"]);
    }
}
