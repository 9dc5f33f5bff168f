/*!
 * Request context passed explicitly to translated records.
 *
 * Carries the caller, the request path and the active language code so that
 * record construction and field reads never consult ambient global state.
 */

use serde::{Deserialize, Serialize};

use crate::locale;

/// Path fragment marking the administrative edit interface
pub const DEFAULT_ADMIN_PATH_MARKER: &str = "/admin/";

/// Language used when a context is built without one
pub const DEFAULT_LANGUAGE: &str = "en";

/// The caller of a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, `None` for anonymous callers
    pub username: Option<String>,

    /// Whether the caller is a staff operator
    pub is_staff: bool,
}

impl User {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn named(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            is_staff: false,
        }
    }

    pub fn staff(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            is_staff: true,
        }
    }
}

/// Per-request state consulted by translated records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    user: User,
    path_info: Option<String>,
    language: String,
    admin_path_marker: String,
}

impl RequestContext {
    /// Create a context for `user` with the default language and no path
    pub fn new(user: User) -> Self {
        Self {
            user,
            path_info: None,
            language: DEFAULT_LANGUAGE.to_string(),
            admin_path_marker: DEFAULT_ADMIN_PATH_MARKER.to_string(),
        }
    }

    /// Create a context whose language is negotiated from an
    /// `Accept-Language` header against `supported` languages
    pub fn from_accept_language(
        user: User,
        accept_language: &str,
        supported: &[String],
        default_language: &str,
    ) -> Self {
        let language = locale::negotiate_language(accept_language, supported, default_language);
        Self::new(user).with_language(&language)
    }

    pub fn with_path(mut self, path_info: &str) -> Self {
        self.path_info = Some(path_info.to_string());
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_admin_path_marker(mut self, marker: &str) -> Self {
        self.admin_path_marker = marker.to_string();
        self
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    /// Active language code for this request
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the request path points into the administrative edit interface
    pub fn is_admin_path(&self) -> bool {
        self.path_info
            .as_deref()
            .is_some_and(|path| path.contains(&self.admin_path_marker))
    }

    /// Staff operators editing in the admin see untranslated values
    pub fn suppresses_translation(&self) -> bool {
        self.user.is_staff && self.is_admin_path()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(User::anonymous())
    }
}
