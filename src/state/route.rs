//! Screens the client can navigate between.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Signin,
    Signup,
    Dashboard,
    Products,
    Settings,
}

impl Route {
    /// Sidebar entries, in display order.
    pub const SIDEBAR: [Route; 3] = [Route::Dashboard, Route::Products, Route::Settings];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Signin => "/signin",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Products => "/dashboard/products",
            Self::Settings => "/dashboard/settings",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Signin => "Sign in",
            Self::Signup => "Sign up",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Settings => "Settings",
        }
    }

    /// Whether the screen needs a session token.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Products | Self::Settings)
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        [Self::Home, Self::Signin, Self::Signup, Self::Dashboard, Self::Products, Self::Settings]
            .into_iter()
            .find(|route| route.path() == path)
    }
}
