use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::window::WindowBuilder;

use crate::app::{App, Message, Model, Session, handle_page_event, page_bindings};
use crate::desktop::SystemDesktop;
use crate::document::{APP_TITLE, Document};
use crate::navigation::{NavigationInterceptor, Redirect};
use crate::search::MATCH_LIMIT;
use crate::view::{UserEvent, WebViewHost, build_webview, scripts};
use crate::watcher::FileWatcher;

const DEFAULT_WIDTH: f64 = 640.0;
const DEFAULT_HEIGHT: f64 = 480.0;
const WATCH_DEBOUNCE: Duration = Duration::from_millis(200);
const WATCH_POLL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// Returns once the user quits or closes the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window or the web view cannot be created.
    pub fn run(self) -> Result<()> {
        let Self {
            document,
            watch_enabled,
            theme,
            maximized,
        } = self;

        let mut event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
        let proxy = event_loop.create_proxy();

        let window = WindowBuilder::new()
            .with_title(APP_TITLE)
            .with_inner_size(LogicalSize::new(DEFAULT_WIDTH, DEFAULT_HEIGHT))
            .with_maximized(maximized)
            .build(&event_loop)
            .context("Failed to create window")?;

        let bootstrap = scripts::bootstrap(&page_bindings(), MATCH_LIMIT)
            .context("Failed to build page bootstrap script")?;
        let interceptor = Rc::new(RefCell::new(NavigationInterceptor::new()));
        let webview = build_webview(&window, &bootstrap, &interceptor, &proxy)?;

        let host = WebViewHost::new(webview, window, interceptor);
        let mut session = Session::new(Model::new(theme), host, SystemDesktop);
        session.start(document);

        let mut watcher = if watch_enabled {
            FileWatcher::new(WATCH_DEBOUNCE)
                .inspect_err(|err| tracing::warn!(%err, "watch unavailable"))
                .ok()
        } else {
            None
        };
        let mut next_poll = Instant::now() + WATCH_POLL;

        let exit_code = event_loop.run_return(|event, _target, control_flow| {
            match event {
                Event::UserEvent(UserEvent::Page(page_event)) => {
                    if let Some(msg) = handle_page_event(page_event, session.model()) {
                        session.dispatch(msg);
                    }
                }
                Event::UserEvent(UserEvent::Redirect(Redirect::External(target))) => {
                    session.dispatch(Message::OpenExternal(target));
                }
                Event::UserEvent(UserEvent::Redirect(Redirect::Anchor(id))) => {
                    session.dispatch(Message::JumpToAnchor(id));
                }
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => session.dispatch(Message::Quit),
                _ => {}
            }

            if let Some(watcher) = watcher.as_mut() {
                let displayed = session.model().document.as_ref().and_then(Document::path);
                if let Err(err) = watcher.retarget(displayed) {
                    tracing::warn!(%err, "cannot watch displayed file");
                }
                let now = Instant::now();
                if now >= next_poll {
                    next_poll = now + WATCH_POLL;
                    if watcher.take_change_ready() {
                        session.dispatch(Message::FileChanged);
                    }
                }
            }

            *control_flow = if session.should_quit() {
                ControlFlow::Exit
            } else if watcher.as_ref().is_some_and(|w| w.target().is_some()) {
                ControlFlow::WaitUntil(next_poll)
            } else {
                ControlFlow::Wait
            };
        });

        tracing::debug!(exit_code, "event loop finished");
        Ok(())
    }
}
