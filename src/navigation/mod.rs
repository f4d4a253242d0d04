//! Navigation policy for the web view.
//!
//! The web view may only show content handed to it by the viewer. Every
//! navigation the page itself starts (link click, script, new window) is
//! vetoed; its target is opened by the operating system instead, or, for
//! in-page anchors, scrolled to.

/// URL the engine reports for content loaded from a string.
const PROGRAMMATIC_URL: &str = "about:blank";

/// Schemes that never make sense to hand to the operating system.
const LOCAL_SCHEMES: &[&str] = &["about", "data", "javascript", "blob"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Navigation inside the current view.
    Navigate,
    /// `target="_blank"`, `window.open` and friends.
    NewWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub target: String,
    pub kind: NavigationKind,
}

impl NavigationRequest {
    pub fn navigate(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: NavigationKind::Navigate,
        }
    }

    pub fn new_window(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            kind: NavigationKind::NewWindow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOrigin {
    /// The load that follows [`NavigationInterceptor::expect_programmatic_load`].
    InitialLoad,
    UserOrPageInitiated,
}

/// What to do instead of a vetoed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// Open the address with the system default handler.
    External(String),
    /// Scroll the current page to the element with this id.
    Anchor(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Veto(Option<Redirect>),
}

impl Decision {
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Tracks programmatic loads and decides every navigation attempt.
#[derive(Debug, Default)]
pub struct NavigationInterceptor {
    /// Armed by a display, spent by the navigation it causes.
    token: bool,
    /// A load let through by the token has not finished yet.
    loading: bool,
}

impl NavigationInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the next navigation to the programmatic document.
    ///
    /// Arming again replaces the earlier permission, so at most one load is
    /// ever let through however many displays were requested.
    pub const fn expect_programmatic_load(&mut self) {
        self.token = true;
    }

    pub const fn has_pending_load(&self) -> bool {
        self.token
    }

    /// The engine finished loading a page.
    ///
    /// A token still armed while nothing it allowed is loading belongs to a
    /// load the engine dropped without asking, and is revoked.
    pub fn page_load_finished(&mut self) {
        if self.loading {
            self.loading = false;
        } else if self.token {
            tracing::debug!("revoking unused programmatic load token");
            self.token = false;
        }
    }

    pub fn classify(&mut self, request: &NavigationRequest) -> NavigationOrigin {
        if self.token
            && request.kind == NavigationKind::Navigate
            && is_programmatic_document(&request.target)
        {
            self.token = false;
            self.loading = true;
            NavigationOrigin::InitialLoad
        } else {
            NavigationOrigin::UserOrPageInitiated
        }
    }

    pub fn decide(&mut self, request: &NavigationRequest) -> Decision {
        match self.classify(request) {
            NavigationOrigin::InitialLoad => {
                tracing::debug!(target = %request.target, "programmatic load allowed");
                Decision::Allow
            }
            NavigationOrigin::UserOrPageInitiated => {
                let redirect = redirect_for(&request.target);
                tracing::debug!(
                    target = %request.target,
                    kind = ?request.kind,
                    ?redirect,
                    "navigation vetoed"
                );
                Decision::Veto(redirect)
            }
        }
    }
}

fn is_programmatic_document(target: &str) -> bool {
    target.is_empty() || target == PROGRAMMATIC_URL || target.starts_with("data:")
}

fn redirect_for(target: &str) -> Option<Redirect> {
    if let Some((document, fragment)) = target.split_once('#') {
        if is_programmatic_document(document) {
            return (!fragment.is_empty()).then(|| Redirect::Anchor(fragment.to_string()));
        }
    }
    let scheme = scheme_of(target)?;
    if LOCAL_SCHEMES.iter().any(|local| scheme.eq_ignore_ascii_case(local)) {
        return None;
    }
    Some(Redirect::External(target.to_string()))
}

/// The URL scheme, if `target` is an absolute URL.
fn scheme_of(target: &str) -> Option<&str> {
    let (scheme, _) = target.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}
