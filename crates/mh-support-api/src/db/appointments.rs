//! Appointment persistence.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use mh_protocol::appointments::{Appointment, AppointmentStatus};
use mh_protocol::users::{RequesterIdentity, Role};

pub struct AppointmentStore {
    pool: Option<PgPool>,
    memory: RwLock<Vec<Appointment>>,
}

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    student_username: String,
    professional_username: String,
    date: NaiveDate,
    time: NaiveTime,
    reason: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<AppointmentRow> for Appointment {
    fn from(row: AppointmentRow) -> Self {
        Appointment {
            id: row.id,
            student_username: row.student_username,
            professional_username: row.professional_username,
            date: row.date,
            time: row.time,
            reason: row.reason,
            status: AppointmentStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

impl AppointmentStore {
    pub fn in_memory() -> Self {
        Self { pool: None, memory: RwLock::new(Vec::new()) }
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool), memory: RwLock::new(Vec::new()) }
    }

    pub async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        match &self.pool {
            Some(pool) => {
                sqlx::query(
                    "INSERT INTO appointments \
                     (id, student_username, professional_username, date, time, reason, status, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                )
                .bind(appointment.id)
                .bind(&appointment.student_username)
                .bind(&appointment.professional_username)
                .bind(appointment.date)
                .bind(appointment.time)
                .bind(&appointment.reason)
                .bind(appointment.status.as_str())
                .bind(appointment.created_at)
                .execute(pool)
                .await?;
            }
            None => {
                self.memory.write().await.push(appointment.clone());
            }
        }
        Ok(())
    }

    /// Appointments visible to the requester: students see their own
    /// bookings, professionals see the ones booked with them.
    pub async fn list_for(&self, requester: &RequesterIdentity) -> anyhow::Result<Vec<Appointment>> {
        let column = match requester.role {
            Role::Student => "student_username",
            Role::Professional => "professional_username",
        };
        match &self.pool {
            Some(pool) => {
                let query = format!(
                    "SELECT id, student_username, professional_username, date, time, reason, status, created_at \
                     FROM appointments WHERE {column} = $1 ORDER BY date, time",
                );
                let rows: Vec<AppointmentRow> = sqlx::query_as(&query)
                    .bind(&requester.username)
                    .fetch_all(pool)
                    .await?;
                Ok(rows.into_iter().map(Appointment::from).collect())
            }
            None => {
                let guard = self.memory.read().await;
                let mut appointments: Vec<Appointment> = guard
                    .iter()
                    .filter(|a| match requester.role {
                        Role::Student => a.student_username == requester.username,
                        Role::Professional => a.professional_username == requester.username,
                    })
                    .cloned()
                    .collect();
                appointments.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
                Ok(appointments)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apt(student: &str, professional: &str, day: u32) -> Appointment {
        Appointment::new(
            student,
            professional,
            NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            "check-in",
        )
    }

    #[tokio::test]
    async fn students_see_only_their_own() {
        let store = AppointmentStore::in_memory();
        store.insert(&apt("amira", "dr-okafor", 1)).await.unwrap();
        store.insert(&apt("joel", "dr-okafor", 2)).await.unwrap();

        let amira = RequesterIdentity::new("amira", Role::Student);
        let listed = store.list_for(&amira).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].student_username, "amira");
    }

    #[tokio::test]
    async fn professionals_see_their_bookings_in_date_order() {
        let store = AppointmentStore::in_memory();
        store.insert(&apt("joel", "dr-okafor", 5)).await.unwrap();
        store.insert(&apt("amira", "dr-okafor", 2)).await.unwrap();
        store.insert(&apt("amira", "dr-reyes", 1)).await.unwrap();

        let okafor = RequesterIdentity::new("dr-okafor", Role::Professional);
        let listed = store.list_for(&okafor).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].student_username, "amira");
        assert_eq!(listed[1].student_username, "joel");
    }
}
