use crate::guard::{self, Access};
use crate::models::Role;
use crate::session::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    Employee,
    Hr,
    NotFound,
}

impl Route {
    pub fn from_path(pathname: &str) -> Self {
        let mut paths = pathname.split('/').collect::<Vec<_>>();
        paths.retain(|path| !path.is_empty());

        match paths.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["employee"] => Route::Employee,
            ["hr"] => Route::Hr,
            _ => Route::NotFound,
        }
    }

    pub fn url(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Employee => "/employee".to_string(),
            Route::Hr => "/hr".to_string(),
            Route::NotFound => "/notfound".to_string(),
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Employee => Some(Role::Employee),
            Route::Hr => Some(Role::Hr),
            _ => None,
        }
    }

    /// Applies the access policy that belongs to this route.
    pub fn access(&self, state: &AuthState) -> Access {
        match self {
            Route::Root => guard::resolve_root(state),
            Route::Login | Route::Register => guard::public_only(state),
            Route::Employee | Route::Hr => guard::protect(state, self.required_role()),
            Route::NotFound => Access::Redirect(Route::Root),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Root);
        assert_eq!(Route::from_path(""), Route::Root);
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(Route::from_path("/register/"), Route::Register);
        assert_eq!(Route::from_path("/employee"), Route::Employee);
        assert_eq!(Route::from_path("/hr"), Route::Hr);
        assert_eq!(Route::from_path("/hr/42"), Route::NotFound);
        assert_eq!(Route::from_path("/admin"), Route::NotFound);
    }

    #[test]
    fn test_url_parses_back() {
        for route in [
            Route::Root,
            Route::Login,
            Route::Register,
            Route::Employee,
            Route::Hr,
        ] {
            assert_eq!(Route::from_path(&route.url()), route);
        }
    }

    #[test]
    fn test_catch_all_goes_to_root() {
        let state = AuthState::default();
        assert_eq!(
            Route::NotFound.access(&state),
            Access::Redirect(Route::Root)
        );
    }
}
