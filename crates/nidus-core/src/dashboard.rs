//! Role-based dashboard routing.
//!
//! Routing is a pure function of a completed profile fetch: the resolved
//! profile is passed in explicitly rather than read from ambient context,
//! and the role → dashboard mapping is an exhaustive match, so adding a
//! role is a compile-time decision rather than a silent fallthrough.

use crate::models::profile::{Profile, Role};

/// Entity collections a dashboard variant loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Startups,
    Cohorts,
    Mentors,
    Investments,
    Events,
    Materials,
    Team,
}

/// One dashboard variant per role. At most one variant exists per resolved
/// profile; the sum type rules out rendering two at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Admin,
    ProgramManager,
    Mentor,
    Investor,
    Founder,
    Support,
}

impl Dashboard {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Dashboard::Admin,
            Role::ProgramManager => Dashboard::ProgramManager,
            Role::Mentor => Dashboard::Mentor,
            Role::Investor => Dashboard::Investor,
            Role::Founder => Dashboard::Founder,
            Role::Support => Dashboard::Support,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dashboard::Admin => "Admin Dashboard",
            Dashboard::ProgramManager => "Program Manager Dashboard",
            Dashboard::Mentor => "Mentor Dashboard",
            Dashboard::Investor => "Investor Dashboard",
            Dashboard::Founder => "Founder Dashboard",
            Dashboard::Support => "Support Dashboard",
        }
    }

    /// Collections this variant loads on mount.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Dashboard::Admin => &[
                Section::Startups,
                Section::Cohorts,
                Section::Mentors,
                Section::Investments,
                Section::Events,
                Section::Materials,
                Section::Team,
            ],
            Dashboard::ProgramManager => &[
                Section::Startups,
                Section::Cohorts,
                Section::Mentors,
                Section::Events,
                Section::Materials,
            ],
            Dashboard::Mentor => &[Section::Startups, Section::Events],
            Dashboard::Investor => &[
                Section::Startups,
                Section::Investments,
                Section::Events,
            ],
            Dashboard::Founder => &[
                Section::Startups,
                Section::Mentors,
                Section::Events,
                Section::Materials,
            ],
            Dashboard::Support => &[
                Section::Startups,
                Section::Events,
                Section::Materials,
            ],
        }
    }
}

/// Full state set of the dashboard router.
///
/// `Loading` is what a caller holds while the profile fetch is in flight;
/// [`route`] maps the completed fetch to one of the remaining states. A
/// fetch error is terminal for the render pass, and `UnknownRole` is a
/// terminal informational state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteState {
    Loading,
    Error(String),
    NoProfile,
    Dashboard(Dashboard),
    UnknownRole(String),
}

/// Route a successfully completed profile fetch.
///
/// `None` means the fetch succeeded but no profile row exists for the
/// authenticated user, which prompts setup rather than an error.
pub fn route(profile: Option<&Profile>) -> RouteState {
    match profile {
        None => RouteState::NoProfile,
        Some(profile) => match profile.role.parse::<Role>() {
            Ok(role) => RouteState::Dashboard(Dashboard::for_role(role)),
            Err(_) => RouteState::UnknownRole(profile.role.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile_with_role(role: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            organization_id: Some(Uuid::new_v4()),
            email: "member@example.com".into(),
            role: role.into(),
            display_name: None,
            active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn every_role_routes_to_its_own_variant() {
        for role in Role::ALL {
            let profile = profile_with_role(role.as_str());
            let state = route(Some(&profile));
            assert_eq!(state, RouteState::Dashboard(Dashboard::for_role(role)));
        }
    }

    #[test]
    fn role_variants_are_distinct() {
        let dashboards: Vec<Dashboard> =
            Role::ALL.iter().map(|r| Dashboard::for_role(*r)).collect();
        for (i, a) in dashboards.iter().enumerate() {
            for b in &dashboards[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unrecognized_role_routes_to_unknown_role() {
        let profile = profile_with_role("guest");
        assert_eq!(
            route(Some(&profile)),
            RouteState::UnknownRole("guest".into())
        );
    }

    #[test]
    fn missing_profile_routes_to_no_profile() {
        assert_eq!(route(None), RouteState::NoProfile);
    }

    #[test]
    fn every_dashboard_declares_sections() {
        for role in Role::ALL {
            assert!(!Dashboard::for_role(role).sections().is_empty());
        }
    }
}
