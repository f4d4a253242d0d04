use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use wry::http::Request;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use super::{PageEvent, ViewHost};
use crate::navigation::{Decision, NavigationInterceptor, NavigationRequest, Redirect};

/// Events the web view callbacks hand to the event loop.
#[derive(Debug)]
pub enum UserEvent {
    Page(PageEvent),
    Redirect(Redirect),
}

/// A [`ViewHost`] backed by a wry web view inside a tao window.
pub struct WebViewHost {
    // Declared first so the web view is torn down before its window.
    webview: WebView,
    window: Window,
    interceptor: Rc<RefCell<NavigationInterceptor>>,
}

impl WebViewHost {
    pub fn new(
        webview: WebView,
        window: Window,
        interceptor: Rc<RefCell<NavigationInterceptor>>,
    ) -> Self {
        Self {
            webview,
            window,
            interceptor,
        }
    }
}

impl ViewHost for WebViewHost {
    fn display(&mut self, html: &str) {
        self.interceptor.borrow_mut().expect_programmatic_load();
        if let Err(err) = self.webview.load_html(html) {
            tracing::warn!(%err, "failed to load page into web view");
        }
    }

    fn run_script(&mut self, snippet: &str) {
        if let Err(err) = self.webview.evaluate_script(snippet) {
            tracing::warn!(%err, "failed to evaluate script");
        }
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

/// Create the web view inside `window`.
///
/// The view starts empty; content only ever arrives through
/// [`ViewHost::display`]. `bootstrap` runs on every page load. Navigation
/// and IPC callbacks post [`UserEvent`]s through `proxy`.
///
/// # Errors
/// Returns an error if the platform web view cannot be created.
pub fn build_webview(
    window: &Window,
    bootstrap: &str,
    interceptor: &Rc<RefCell<NavigationInterceptor>>,
    proxy: &EventLoopProxy<UserEvent>,
) -> Result<WebView> {
    let ipc_proxy = proxy.clone();
    let navigate_proxy = proxy.clone();
    let new_window_proxy = proxy.clone();
    let navigate_interceptor = Rc::clone(interceptor);
    let new_window_interceptor = Rc::clone(interceptor);
    let load_interceptor = Rc::clone(interceptor);

    let builder = WebViewBuilder::new()
        .with_initialization_script(bootstrap)
        .with_devtools(false)
        .with_focused(true)
        .with_ipc_handler(move |request: Request<String>| {
            match PageEvent::parse(request.body()) {
                Ok(event) => post(&ipc_proxy, UserEvent::Page(event)),
                Err(err) => tracing::warn!(%err, "ignoring malformed page message"),
            }
        })
        .with_navigation_handler(move |target: String| {
            intercept(
                &navigate_interceptor,
                &navigate_proxy,
                &NavigationRequest::navigate(target),
            )
        })
        .with_new_window_req_handler(move |target: String| {
            intercept(
                &new_window_interceptor,
                &new_window_proxy,
                &NavigationRequest::new_window(target),
            )
        })
        .with_on_page_load_handler(move |event, url| {
            if matches!(event, PageLoadEvent::Finished) {
                tracing::trace!(%url, "page load finished");
                load_interceptor.borrow_mut().page_load_finished();
            }
        });

    #[cfg(any(target_os = "windows", target_os = "macos"))]
    let webview = builder.build(window).context("Failed to create web view")?;

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;

        let container = window
            .default_vbox()
            .context("Window has no GTK container for the web view")?;
        builder
            .build_gtk(container)
            .context("Failed to create web view")?
    };

    Ok(webview)
}

/// Decide a navigation; returns whether the web view may follow it.
fn intercept(
    interceptor: &RefCell<NavigationInterceptor>,
    proxy: &EventLoopProxy<UserEvent>,
    request: &NavigationRequest,
) -> bool {
    let decision = interceptor.borrow_mut().decide(request);
    match decision {
        Decision::Allow => true,
        Decision::Veto(redirect) => {
            if let Some(redirect) = redirect {
                post(proxy, UserEvent::Redirect(redirect));
            }
            false
        }
    }
}

fn post(proxy: &EventLoopProxy<UserEvent>, event: UserEvent) {
    if proxy.send_event(event).is_err() {
        tracing::debug!("event loop closed; dropping web view event");
    }
}
