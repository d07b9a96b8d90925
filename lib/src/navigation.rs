// lib/src/navigation.rs
use models::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub title: &'static str,
}

const fn link(path: &'static str, title: &'static str) -> NavLink {
    NavLink { path, title }
}

const COMMON_LINKS: [NavLink; 3] = [
    link("/dashboard", "Dashboard"),
    link("/profile", "Profile"),
    link("/settings", "Settings"),
];

const PATIENT_LINKS: [NavLink; 3] = [
    link("/medical-records", "Medical Records"),
    link("/appointments", "Appointments"),
    link("/prescriptions", "Prescriptions"),
];

const DOCTOR_LINKS: [NavLink; 3] = [
    link("/patients", "Patients"),
    link("/appointments", "Appointments"),
    link("/prescriptions", "Prescriptions"),
];

const ADMIN_LINKS: [NavLink; 2] = [
    link("/manage-users", "Manage Users"),
    link("/system-logs", "System Logs"),
];

/// Menu entries for the signed-in role. Signed-out visitors get only the
/// common entries.
pub fn nav_links(role: Option<Role>) -> Vec<NavLink> {
    let role_links: &[NavLink] = match role {
        Some(Role::Patient) => &PATIENT_LINKS,
        Some(Role::Doctor) => &DOCTOR_LINKS,
        Some(Role::Admin) => &ADMIN_LINKS,
        None => &[],
    };
    COMMON_LINKS.iter().chain(role_links).copied().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardKind {
    Patient,
    Doctor,
    Admin,
    /// No session: send the visitor to the login page.
    Login,
}

pub fn dashboard_for(role: Option<Role>) -> DashboardKind {
    match role {
        Some(Role::Patient) => DashboardKind::Patient,
        Some(Role::Doctor) => DashboardKind::Doctor,
        Some(Role::Admin) => DashboardKind::Admin,
        None => DashboardKind::Login,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(role: Option<Role>) -> Vec<&'static str> {
        nav_links(role).into_iter().map(|l| l.title).collect()
    }

    #[test]
    fn each_role_extends_the_common_links() {
        assert_eq!(
            titles(Some(Role::Patient)),
            vec!["Dashboard", "Profile", "Settings", "Medical Records", "Appointments", "Prescriptions"]
        );
        assert_eq!(
            titles(Some(Role::Doctor)),
            vec!["Dashboard", "Profile", "Settings", "Patients", "Appointments", "Prescriptions"]
        );
        assert_eq!(
            titles(Some(Role::Admin)),
            vec!["Dashboard", "Profile", "Settings", "Manage Users", "System Logs"]
        );
        assert_eq!(titles(None), vec!["Dashboard", "Profile", "Settings"]);
    }

    #[test]
    fn signed_out_visitors_are_sent_to_login() {
        assert_eq!(dashboard_for(None), DashboardKind::Login);
        assert_eq!(dashboard_for(Some(Role::Doctor)), DashboardKind::Doctor);
    }
}
