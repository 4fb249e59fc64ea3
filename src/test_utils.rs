#[cfg(test)]
pub mod test_helpers {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures::future::BoxFuture;
    use tokio::sync::oneshot;
    use tokio_util::sync::CancellationToken;

    use crate::app::App;
    use crate::element::{Attributes, ElementStyle, Sibling, TextInput};
    use crate::suggest::{FetchError, SuggestionRequest, SuggestionSource};
    use crate::textarea::{SmartTextArea, SmartTextAreaOptions};

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    pub fn key_with_mods(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    /// Focused text area with the caret at `caret`
    pub fn text_area_at(value: &str, caret: usize) -> TextInput {
        let mut input = TextInput::textarea().with_value(value).focused();
        input.set_selection_range(caret, caret);
        input
    }

    /// Host app around a terminal-styled text area, caret at the end
    ///
    /// Must run inside a tokio runtime.
    pub fn test_app(
        value: &str,
        options: SmartTextAreaOptions,
        replies: Vec<Reply>,
    ) -> (App, Arc<FakeSource>) {
        let source = FakeSource::new(replies);
        let mut smart = SmartTextArea::new(
            Attributes::new(),
            options,
            tokio::runtime::Handle::current(),
            source.clone(),
        );
        let element = TextInput::textarea()
            .with_style(ElementStyle::terminal(38, 3))
            .with_value(value)
            .focused();
        smart.attach(Sibling::Input(element)).unwrap();
        (App::new(smart), source)
    }

    /// Scripted answer for one `FakeSource::fetch`
    pub enum Reply {
        Now(Result<Option<String>, FetchError>),
        /// Resolves when the sender fires (or aborts first)
        Later(oneshot::Receiver<Option<String>>),
    }

    impl Reply {
        pub fn text(text: &str) -> Self {
            Reply::Now(Ok(Some(text.to_string())))
        }

        pub fn later() -> (oneshot::Sender<Option<String>>, Self) {
            let (tx, rx) = oneshot::channel();
            (tx, Reply::Later(rx))
        }
    }

    /// Suggestion source answering from a script and recording requests
    #[derive(Default)]
    pub struct FakeSource {
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<(SuggestionRequest, CancellationToken)>>,
    }

    impl FakeSource {
        pub fn new(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::default(),
            })
        }

        pub fn requests(&self) -> Vec<SuggestionRequest> {
            let requests = self.requests.lock().unwrap();
            requests.iter().map(|(r, _)| r.clone()).collect()
        }

        pub fn token(&self, index: usize) -> CancellationToken {
            self.requests.lock().unwrap()[index].1.clone()
        }
    }

    impl SuggestionSource for FakeSource {
        fn fetch(
            &self,
            request: SuggestionRequest,
            abort: CancellationToken,
        ) -> BoxFuture<'static, Result<Option<String>, FetchError>> {
            self.requests
                .lock()
                .unwrap()
                .push((request, abort.clone()));
            let reply = self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Reply::Now(Ok(None)));
            Box::pin(async move {
                match reply {
                    Reply::Now(_) if abort.is_cancelled() => Err(FetchError::Aborted),
                    Reply::Now(result) => result,
                    Reply::Later(rx) => tokio::select! {
                        biased;
                        _ = abort.cancelled() => Err(FetchError::Aborted),
                        text = rx => Ok(text.ok().flatten()),
                    },
                }
            })
        }
    }
}
