use super::{AppointmentQuery, IAppointmentRepo};
use chrono::NaiveDate;
use salon_notifier_domain::{Appointment, Contact, ReminderFlag, ReminderFlags, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::warn;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Barber contact details live on the barber's user, client details are
// captured on the appointment when it is booked
const SELECT_APPOINTMENTS: &str = r#"
    SELECT a.*,
        b.name AS barber_name,
        b.email AS barber_email,
        b.phone AS barber_phone
    FROM appointments AS a
    LEFT JOIN users AS b ON b.user_uid = a.barber_user_uid
"#;

#[derive(Debug, FromRow)]
struct AppointmentRaw {
    appointment_uid: Uuid,
    date: NaiveDate,
    time: String,
    status: String,
    client_user_uid: Option<Uuid>,
    client_name: Option<String>,
    client_email: Option<String>,
    client_phone: Option<String>,
    barber_user_uid: Option<Uuid>,
    barber_name: Option<String>,
    barber_email: Option<String>,
    barber_phone: Option<String>,
    service_name: Option<String>,
    notification_24h_sent: bool,
    sms_24h_sent: bool,
    notification_12h_sent: bool,
    notification_2h_sent: bool,
    sms_2h_sent: bool,
    notification_30m_sent: bool,
    thank_you_sent: bool,
}

impl AppointmentRaw {
    fn into_appointment(self) -> Option<Appointment> {
        let status = match self.status.parse() {
            Ok(status) => status,
            Err(e) => {
                warn!("Skipping appointment {}: {}", self.appointment_uid, e);
                return None;
            }
        };
        let client = if self.client_user_uid.is_some()
            || self.client_name.is_some()
            || self.client_email.is_some()
            || self.client_phone.is_some()
        {
            Some(Contact {
                user_id: self.client_user_uid.map(ID::from),
                name: self.client_name,
                email: self.client_email,
                phone: self.client_phone,
            })
        } else {
            None
        };
        let barber = self.barber_user_uid.map(|user_uid| Contact {
            user_id: Some(user_uid.into()),
            name: self.barber_name,
            email: self.barber_email,
            phone: self.barber_phone,
        });

        Some(Appointment {
            id: self.appointment_uid.into(),
            date: self.date,
            time: self.time,
            status,
            client,
            barber,
            service_name: self.service_name,
            flags: ReminderFlags {
                notification_24h_sent: self.notification_24h_sent,
                sms_24h_sent: self.sms_24h_sent,
                notification_12h_sent: self.notification_12h_sent,
                notification_2h_sent: self.notification_2h_sent,
                sms_2h_sent: self.sms_2h_sent,
                notification_30m_sent: self.notification_30m_sent,
                thank_you_sent: self.thank_you_sent,
            },
        })
    }
}

#[async_trait::async_trait]
impl IAppointmentRepo for PostgresAppointmentRepo {
    async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
        let client = appointment.client.clone().unwrap_or_default();
        let barber_user_uid = appointment
            .barber
            .as_ref()
            .and_then(|b| b.user_id.as_ref())
            .map(|id| *id.inner_ref());
        let flags = &appointment.flags;

        sqlx::query(
            r#"
            INSERT INTO appointments
            (appointment_uid, date, time, status,
             client_user_uid, client_name, client_email, client_phone,
             barber_user_uid, service_name,
             notification_24h_sent, sms_24h_sent, notification_12h_sent,
             notification_2h_sent, sms_2h_sent, notification_30m_sent, thank_you_sent)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(*appointment.id.inner_ref())
        .bind(appointment.date)
        .bind(&appointment.time)
        .bind(appointment.status.as_str())
        .bind(client.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(client.name)
        .bind(client.email)
        .bind(client.phone)
        .bind(barber_user_uid)
        .bind(&appointment.service_name)
        .bind(flags.notification_24h_sent)
        .bind(flags.sms_24h_sent)
        .bind(flags.notification_12h_sent)
        .bind(flags.notification_2h_sent)
        .bind(flags.sms_2h_sent)
        .bind(flags.notification_30m_sent)
        .bind(flags.thank_you_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
        let query = format!("{} WHERE a.appointment_uid = $1", SELECT_APPOINTMENTS);
        match sqlx::query_as::<_, AppointmentRaw>(&query)
            .bind(*appointment_id.inner_ref())
            .fetch_one(&self.pool)
            .await
        {
            Ok(raw) => raw.into_appointment(),
            Err(_) => None,
        }
    }

    async fn find_candidates(&self, query: &AppointmentQuery) -> anyhow::Result<Vec<Appointment>> {
        if query.statuses.is_empty() || query.unsent_flags.is_empty() {
            return Ok(vec![]);
        }
        let unsent = query
            .unsent_flags
            .iter()
            .map(|flag| format!("a.{} = FALSE", flag.column_name()))
            .collect::<Vec<_>>()
            .join(" OR ");
        let sql = format!(
            "{} WHERE a.date >= $1 AND a.date <= $2 AND a.status = ANY($3) AND ({}) ORDER BY a.date, a.time",
            SELECT_APPOINTMENTS, unsent
        );
        let statuses = query
            .statuses
            .iter()
            .map(|s| s.as_str().to_string())
            .collect::<Vec<_>>();

        let appointments = sqlx::query_as::<_, AppointmentRaw>(&sql)
            .bind(query.from_date)
            .bind(query.to_date)
            .bind(statuses)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .filter_map(|raw| raw.into_appointment())
            .collect();

        Ok(appointments)
    }

    async fn try_claim(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<bool> {
        // Only column names known at compile time are interpolated
        let sql = format!(
            "UPDATE appointments SET {col} = TRUE WHERE appointment_uid = $1 AND {col} = FALSE",
            col = flag.column_name()
        );
        let res = sqlx::query(&sql)
            .bind(*appointment_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(res.rows_affected() == 1)
    }

    async fn set_flag(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<()> {
        let sql = format!(
            "UPDATE appointments SET {} = TRUE WHERE appointment_uid = $1",
            flag.column_name()
        );
        sqlx::query(&sql)
            .bind(*appointment_id.inner_ref())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
