//! Route table and guard

use std::fmt;

use crate::session::AuthState;

/// A console location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Usuarios,
    Eventos,
    Categorias,
    Inscripciones,
    NotFound(String),
}

impl Route {
    /// Entries shown in the navigation bar, in order
    pub const NAV: [Route; 5] = [
        Route::Dashboard,
        Route::Usuarios,
        Route::Eventos,
        Route::Categorias,
        Route::Inscripciones,
    ];

    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match normalized {
            "/login" => Route::Login,
            "/" => Route::Dashboard,
            "/usuarios" => Route::Usuarios,
            "/eventos" => Route::Eventos,
            "/categorias" => Route::Categorias,
            "/inscripciones" => Route::Inscripciones,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => "/login",
            Route::Dashboard => "/",
            Route::Usuarios => "/usuarios",
            Route::Eventos => "/eventos",
            Route::Categorias => "/categorias",
            Route::Inscripciones => "/inscripciones",
            Route::NotFound(path) => path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Route::Login => "Login",
            Route::Dashboard => "Dashboard",
            Route::Usuarios => "Usuarios",
            Route::Eventos => "Eventos",
            Route::Categorias => "Categorías",
            Route::Inscripciones => "Inscripciones",
            Route::NotFound(_) => "No encontrado",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where to send the user instead of `route`, if anywhere
///
/// Only a settled unauthenticated state redirects; nothing moves while the
/// session is still loading.
pub fn guard(route: &Route, state: &AuthState) -> Option<Route> {
    match state {
        AuthState::Unauthenticated if *route != Route::Login => Some(Route::Login),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::admin_user;

    #[test]
    fn test_route_table() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
        assert_eq!(Route::from_path("/eventos/"), Route::Eventos);
        assert_eq!(Route::from_path("/login"), Route::Login);
        assert_eq!(
            Route::from_path("/reportes"),
            Route::NotFound("/reportes".to_string())
        );
        for route in Route::NAV {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_guard() {
        let out = AuthState::Unauthenticated;
        assert_eq!(guard(&Route::Eventos, &out), Some(Route::Login));
        assert_eq!(guard(&Route::NotFound("/x".to_string()), &out), Some(Route::Login));
        assert_eq!(guard(&Route::Login, &out), None);

        assert_eq!(guard(&Route::Eventos, &AuthState::Loading(None)), None);
        assert_eq!(
            guard(&Route::Eventos, &AuthState::Authenticated(admin_user())),
            None
        );
    }
}
