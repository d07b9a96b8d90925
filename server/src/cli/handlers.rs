// server/src/cli/handlers.rs

// Command handlers. Each one reads the session, derives a view from the
// data store and prints it as plain text to `out`.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use log::debug;

use carebase_lib::dashboards::{admin_dashboard, doctor_dashboard, patient_dashboard};
use carebase_lib::navigation::{dashboard_for, nav_links, DashboardKind};
use carebase_lib::views::{
    counterpart_name, derive_appointment_view, derive_record_view, display_date, AppointmentQuery,
    RecordFilter, RecordQuery,
};
use carebase_security::{hash_password, SessionManager};
use models::{Role, UserProfile};

use crate::cli::commands::{AppointmentsArgs, LoginArgs, RecordsArgs};

fn require_user(session: &SessionManager) -> Result<UserProfile> {
    session.current_user().ok_or_else(|| anyhow!("Please sign in first"))
}

pub async fn handle_login(session: &SessionManager, args: &LoginArgs, out: &mut dyn Write) -> Result<()> {
    let profile = session.login(&args.email, &args.password).await?;
    writeln!(out, "Welcome, {} ({})", profile.name(), profile.role().title())?;
    Ok(())
}

pub fn handle_logout(session: &SessionManager, out: &mut dyn Write) -> Result<()> {
    session.logout()?;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn handle_whoami(session: &SessionManager, out: &mut dyn Write) -> Result<()> {
    match session.current_user() {
        Some(profile) => {
            writeln!(out, "{} <{}>", profile.name(), profile.email())?;
            writeln!(out, "Role: {}", profile.role().title())?;
            writeln!(out, "Id:   {}", profile.id())?;
            if let Some(avatar) = profile.avatar() {
                writeln!(out, "Avatar: {}", avatar)?;
            }
            match &profile {
                UserProfile::Patient(patient) => {
                    writeln!(out, "Born: {}", display_date(patient.date_of_birth))?;
                    if let Some(blood_type) = &patient.blood_type {
                        writeln!(out, "Blood type: {}", blood_type)?;
                    }
                }
                UserProfile::Doctor(doctor) => {
                    writeln!(out, "Specialization: {} ({} years)", doctor.specialization, doctor.years_of_experience)?;
                }
                UserProfile::Admin(admin) => {
                    writeln!(out, "Department: {}", admin.department)?;
                }
            }
        }
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

pub fn handle_nav(session: &SessionManager, out: &mut dyn Write) -> Result<()> {
    let role = session.current_user().map(|profile| profile.role());
    for link in nav_links(role) {
        writeln!(out, "{:<18} {}", link.title, link.path)?;
    }
    Ok(())
}

pub fn handle_dashboard(session: &SessionManager, today: NaiveDate, out: &mut dyn Write) -> Result<()> {
    let user = session.current_user();
    let store = session.data_store().as_ref();
    debug!("Rendering dashboard for {:?} as of {}", user.as_ref().map(|u| u.id()), today);

    match (dashboard_for(user.as_ref().map(|u| u.role())), user) {
        (DashboardKind::Patient, Some(user)) => {
            let dashboard = patient_dashboard(store, user.id());
            writeln!(out, "Welcome back, {}", user.name())?;
            writeln!(out, "\nUpcoming appointments ({})", dashboard.upcoming_total)?;
            for appointment in &dashboard.upcoming_appointments {
                let doctor = counterpart_name(store, appointment, Role::Patient).unwrap_or("Unknown doctor");
                writeln!(
                    out,
                    "  {} {}  {}  with {}",
                    display_date(appointment.date),
                    appointment.time_label(),
                    appointment.reason,
                    doctor
                )?;
            }
            writeln!(out, "\nRecent records ({})", dashboard.records_total)?;
            for record in &dashboard.recent_records {
                writeln!(out, "  {}  {}", display_date(record.date), record.diagnosis)?;
            }
            writeln!(out, "\nPrescriptions ({})", dashboard.prescriptions.len())?;
            for prescription in &dashboard.prescriptions {
                let names: Vec<&str> = prescription.medications.iter().map(|m| m.name.as_str()).collect();
                writeln!(out, "  {}  {}", display_date(prescription.date), names.join(", "))?;
            }
            writeln!(out, "\nYour doctors")?;
            for doctor in &dashboard.doctors {
                writeln!(out, "  {}, {}", doctor.name, doctor.specialization)?;
            }
        }
        (DashboardKind::Doctor, Some(user)) => {
            let dashboard = doctor_dashboard(store, user.id(), today);
            writeln!(out, "Welcome back, {}", user.name())?;
            writeln!(out, "\nToday ({})", dashboard.todays_appointments.len())?;
            for appointment in &dashboard.todays_appointments {
                let patient = counterpart_name(store, appointment, Role::Doctor).unwrap_or("Unknown patient");
                writeln!(out, "  {}  {}  {}", appointment.time_label(), patient, appointment.reason)?;
            }
            writeln!(out, "\nUpcoming ({})", dashboard.upcoming_total)?;
            for appointment in &dashboard.upcoming_appointments {
                let patient = counterpart_name(store, appointment, Role::Doctor).unwrap_or("Unknown patient");
                writeln!(
                    out,
                    "  {} {}  {}  {}",
                    display_date(appointment.date),
                    appointment.time_label(),
                    patient,
                    appointment.reason
                )?;
            }
            writeln!(out, "\nRecent patients")?;
            for visit in &dashboard.recent_patients {
                writeln!(
                    out,
                    "  {}, {} years  last visit {}",
                    visit.patient.name,
                    visit.age,
                    display_date(visit.appointment.date)
                )?;
            }
        }
        (DashboardKind::Admin, Some(user)) => {
            let dashboard = admin_dashboard(store);
            writeln!(out, "Welcome back, {}", user.name())?;
            writeln!(out, "\nTotal users:     {}", dashboard.total_users)?;
            writeln!(out, "Active patients: {}", dashboard.active_patients)?;
            writeln!(out, "Doctors:         {}", dashboard.doctors)?;
            writeln!(out, "\nRecent users")?;
            for user in &dashboard.recent_users {
                writeln!(out, "  {:<20} {:<22} {}", user.name, user.email, user.role.title())?;
            }
        }
        _ => bail!("Please sign in first"),
    }
    Ok(())
}

pub fn handle_appointments(session: &SessionManager, args: &AppointmentsArgs, out: &mut dyn Write) -> Result<()> {
    let user = require_user(session)?;
    let store = session.data_store().as_ref();
    let query = AppointmentQuery {
        bucket: args.filter,
        search: args.search.clone(),
    };

    let groups = derive_appointment_view(store, &user, &query);
    if groups.is_empty() {
        writeln!(out, "No appointments found")?;
        return Ok(());
    }
    for group in groups {
        writeln!(out, "{}", group.label)?;
        for appointment in &group.items {
            let with = counterpart_name(store, appointment, user.role()).unwrap_or("Unknown");
            writeln!(
                out,
                "  {} {}  {:<10} {:<28} {}",
                display_date(appointment.date),
                appointment.time_label(),
                appointment.status.to_string(),
                appointment.reason,
                with
            )?;
        }
    }
    Ok(())
}

pub fn handle_records(session: &SessionManager, args: &RecordsArgs, out: &mut dyn Write) -> Result<()> {
    let user = require_user(session)?;
    let patient_id = match (user.role(), &args.patient) {
        (Role::Patient, _) => user.id().to_string(),
        (_, Some(patient_id)) => patient_id.clone(),
        (_, None) => bail!("--patient is required for {} accounts", user.role()),
    };
    let store = session.data_store().as_ref();
    let query = RecordQuery {
        search: args.search.clone(),
        filter: if args.with_attachments { RecordFilter::HasAttachments } else { RecordFilter::None },
    };

    let groups = derive_record_view(store, &patient_id, &query);
    if groups.is_empty() {
        writeln!(out, "No medical records found")?;
        return Ok(());
    }
    for group in groups {
        writeln!(out, "{}", group.label)?;
        for record in &group.items {
            writeln!(out, "  {}  {}: {}", display_date(record.date), record.diagnosis, record.treatment)?;
            for attachment in record.attachments.iter().flatten() {
                writeln!(out, "      [{}] {}", attachment.kind, attachment.name)?;
            }
        }
    }
    Ok(())
}

pub fn handle_hash_password(password: &str, out: &mut dyn Write) -> Result<()> {
    if password.is_empty() {
        bail!("Password is required");
    }
    writeln!(out, "{}", hash_password(password)?)?;
    Ok(())
}
