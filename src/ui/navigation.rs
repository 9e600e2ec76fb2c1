/// Tabs on the Home screen, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Chatbot,
    Schedule,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Home, Tab::Chatbot, Tab::Schedule];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Chatbot => "Chatbot",
            Tab::Schedule => "Schedule",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Named destinations of the navigation stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Home(Tab),
    Chatbot,
    Date,
}

impl Route {
    pub fn name(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Signup => "Signup",
            Route::Home(_) => "Home",
            Route::Chatbot => "Chatbot",
            Route::Date => "Date",
        }
    }
}

/// Stack navigator; the bottom entry is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator {
            stack: vec![Route::Login],
        }
    }
}

impl Navigator {
    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Login)
    }

    pub fn navigate(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pops the top route. Returns false when already at the root.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, route: Route) {
        self.stack.clear();
        self.stack.push(route);
    }

    /// Switches the tab of the Home route on top of the stack, if any.
    pub fn select_tab(&mut self, tab: Tab) {
        if let Some(Route::Home(current)) = self.stack.last_mut() {
            *current = tab;
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_route_is_login() {
        let nav = Navigator::default();
        assert_eq!(nav.current(), Route::Login);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_navigate_and_back() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Home(Tab::Home));
        nav.navigate(Route::Chatbot);
        assert_eq!(nav.current(), Route::Chatbot);
        assert!(nav.go_back());
        assert_eq!(nav.current(), Route::Home(Tab::Home));
        assert!(nav.go_back());
        assert!(!nav.go_back());
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_reset_replaces_stack() {
        let mut nav = Navigator::default();
        nav.navigate(Route::Signup);
        nav.reset(Route::Login);
        assert_eq!(nav.depth(), 1);
        assert_eq!(nav.current(), Route::Login);
    }

    #[test]
    fn test_tab_set_and_cycle() {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(titles, ["Home", "Chatbot", "Schedule"]);
        assert_eq!(Tab::Home.next(), Tab::Chatbot);
        assert_eq!(Tab::Schedule.next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Schedule);
    }

    #[test]
    fn test_select_tab_only_affects_home() {
        let mut nav = Navigator::default();
        nav.select_tab(Tab::Schedule);
        assert_eq!(nav.current(), Route::Login);
        nav.navigate(Route::Home(Tab::Home));
        nav.select_tab(Tab::Schedule);
        assert_eq!(nav.current(), Route::Home(Tab::Schedule));
    }

    #[test]
    fn test_route_names() {
        let names: Vec<&str> = [
            Route::Login,
            Route::Signup,
            Route::Home(Tab::Chatbot),
            Route::Chatbot,
            Route::Date,
        ]
        .iter()
        .map(|r| r.name())
        .collect();
        assert_eq!(names, ["Login", "Signup", "Home", "Chatbot", "Date"]);
    }
}
