//! Route level authorization.
//!
//! Every function here is a pure decision over an [`AuthState`] snapshot, the
//! caller is responsible for acting on the returned [`Access`].

use crate::models::Role;
use crate::route::Route;
use crate::session::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Session is still being restored, show a neutral placeholder.
    Wait,
    Redirect(Route),
    Render,
}

fn default_route(role: Option<Role>) -> Route {
    role.unwrap_or_default().default_route()
}

/// Gate for views that need a signed in user, optionally of a given role.
pub fn protect(state: &AuthState, required_role: Option<Role>) -> Access {
    if state.loading {
        return Access::Wait;
    }

    if !state.is_authenticated() {
        return Access::Redirect(Route::Login);
    }

    match required_role {
        Some(required) if state.role() != Some(required) => {
            Access::Redirect(default_route(state.role()))
        }
        _ => Access::Render,
    }
}

/// Gate for login and registration, a signed in user is sent home instead.
pub fn public_only(state: &AuthState) -> Access {
    if state.loading {
        Access::Wait
    } else if state.is_authenticated() {
        Access::Redirect(default_route(state.role()))
    } else {
        Access::Render
    }
}

/// Where `/` leads.
pub fn resolve_root(state: &AuthState) -> Access {
    if state.loading {
        Access::Wait
    } else if state.is_authenticated() {
        Access::Redirect(default_route(state.role()))
    } else {
        Access::Redirect(Route::Login)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::User;
    use crate::session::Session;

    fn state(loading: bool, role: Option<Role>) -> AuthState {
        AuthState {
            loading,
            session: role.map(|role| Session {
                token: "t.o.k".to_string(),
                user: User {
                    id: "1".to_string(),
                    name: "Pat".to_string(),
                    email: "pat@corp.io".to_string(),
                    role,
                },
            }),
        }
    }

    fn expected(
        loading: bool,
        authenticated: bool,
        required: Option<Role>,
        actual: Role,
    ) -> Access {
        if loading {
            Access::Wait
        } else if !authenticated {
            Access::Redirect(Route::Login)
        } else if required.is_some_and(|r| r != actual) {
            Access::Redirect(actual.default_route())
        } else {
            Access::Render
        }
    }

    #[test]
    fn test_redirect_target_renders() {
        let routes = [
            Route::Root,
            Route::Login,
            Route::Register,
            Route::Employee,
            Route::Hr,
            Route::NotFound,
        ];
        for role in [None, Some(Role::Employee), Some(Role::Hr)] {
            let auth = state(false, role);
            for route in routes {
                if let Access::Redirect(target) = route.access(&auth) {
                    assert_ne!(target, route, "{:?} redirects to itself", route);
                    let settled = match target.access(&auth) {
                        Access::Redirect(next) => next.access(&auth),
                        access => access,
                    };
                    assert_eq!(settled, Access::Render, "{:?} as {:?}", route, role);
                }
            }
        }
    }

    #[test]
    fn test_protect_decision_table() {
        let roles = [Role::Employee, Role::Hr];
        for loading in [true, false] {
            for authenticated in [true, false] {
                for required in [None, Some(Role::Employee), Some(Role::Hr)] {
                    for actual in roles {
                        let state = state(loading, authenticated.then_some(actual));
                        assert_eq!(
                            protect(&state, required),
                            expected(loading, authenticated, required, actual),
                            "loading={loading} authenticated={authenticated} \
                             required={required:?} actual={actual:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_employee_visiting_hr() {
        let state = state(false, Some(Role::Employee));
        assert_eq!(Route::Hr.access(&state), Access::Redirect(Route::Employee));
        assert_eq!(Route::Employee.access(&state), Access::Render);
    }

    #[test]
    fn test_hr_visiting_employee() {
        let state = state(false, Some(Role::Hr));
        assert_eq!(Route::Employee.access(&state), Access::Redirect(Route::Hr));
        assert_eq!(Route::Hr.access(&state), Access::Render);
    }

    #[test]
    fn test_anonymous_visiting_protected() {
        let state = state(false, None);
        assert_eq!(Route::Hr.access(&state), Access::Redirect(Route::Login));
        assert_eq!(protect(&state, None), Access::Redirect(Route::Login));
    }

    #[test]
    fn test_public_only() {
        assert_eq!(public_only(&state(true, None)), Access::Wait);
        assert_eq!(public_only(&state(true, Some(Role::Hr))), Access::Wait);
        assert_eq!(public_only(&state(false, None)), Access::Render);
        assert_eq!(
            public_only(&state(false, Some(Role::Hr))),
            Access::Redirect(Route::Hr)
        );
        assert_eq!(
            Route::Register.access(&state(false, Some(Role::Employee))),
            Access::Redirect(Route::Employee)
        );
    }

    #[test]
    fn test_resolve_root() {
        assert_eq!(resolve_root(&state(true, None)), Access::Wait);
        assert_eq!(
            resolve_root(&state(false, None)),
            Access::Redirect(Route::Login)
        );
        assert_eq!(
            resolve_root(&state(false, Some(Role::Hr))),
            Access::Redirect(Route::Hr)
        );
        assert_eq!(
            resolve_root(&state(false, Some(Role::Employee))),
            Access::Redirect(Route::Employee)
        );
    }
}
