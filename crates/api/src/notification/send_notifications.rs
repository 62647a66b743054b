use super::{
    claim::ClaimCoordinator,
    email_dispatcher::EmailDispatcher,
    push_dispatcher::PushDispatcher,
    sms_dispatcher::SmsDispatcher,
    subscribers::LogRunSummary,
    templates::AppointmentDetails,
};
use crate::{
    error::NotifierError,
    shared::{
        auth::{protect_trigger_route, TriggerSource},
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{NaiveDate, TimeZone};
use salon_notifier_api_structs::dtos::NotificationDetailsDTO;
use salon_notifier_api_structs::send_notifications::*;
use salon_notifier_domain::{Appointment, ReminderWindow, TimeSpan, Tz, User};
use salon_notifier_infra::{AppointmentQuery, IAppointmentRepo, NotifierContext};
use std::fmt::Display;
use tracing::{debug, info, warn};

fn handle_error(e: UseCaseErrors) -> NotifierError {
    match e {
        UseCaseErrors::StoreError(e) => NotifierError::NotificationRunFailed(format!("{:?}", e)),
    }
}

pub async fn send_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    let source = protect_trigger_route(&http_req, &ctx.config)?;

    let usecase = SendNotificationsUseCase {
        trigger: RunTrigger::Http(source),
    };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary.details())))
        .map_err(handle_error)
}

/// What started a notifications run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTrigger {
    Http(TriggerSource),
    JobScheduler,
}

impl Display for RunTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(source) => write!(f, "http ({})", source),
            Self::JobScheduler => write!(f, "job scheduler"),
        }
    }
}

/// Counters of a single notifications run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reminders_24h: usize,
    pub reminders_12h: usize,
    pub reminders_2h: usize,
    pub reminders_30m: usize,
    pub thank_you: usize,
    pub sms_sent: usize,
    pub emails_sent: usize,
    pub push_delivered: usize,
    pub subscriptions_removed: usize,
    /// Candidates whose date and time could not be interpreted
    pub skipped: usize,
}

impl RunSummary {
    fn record_claim(&mut self, window: ReminderWindow) {
        match window {
            ReminderWindow::TwentyFourHours => self.reminders_24h += 1,
            ReminderWindow::TwelveHours => self.reminders_12h += 1,
            ReminderWindow::TwoHours => self.reminders_2h += 1,
            ReminderWindow::ThirtyMinutes => self.reminders_30m += 1,
            ReminderWindow::ThankYou => self.thank_you += 1,
        }
    }

    /// Appointments claimed for a notification across all windows
    pub fn sent_count(&self) -> usize {
        self.details().notifications()
    }

    pub fn details(&self) -> NotificationDetailsDTO {
        NotificationDetailsDTO {
            reminders_24h: self.reminders_24h,
            reminders_12h: self.reminders_12h,
            reminders_2h: self.reminders_2h,
            reminders_30m: self.reminders_30m,
            thank_you: self.thank_you,
            sms_sent: self.sms_sent,
        }
    }
}

/// Evaluates every `ReminderWindow` once and dispatches the reminders that are
/// due.
///
/// Each appointment is its own unit of work: it is claimed and dispatched
/// independently, so a run that fails halfway leaves the remaining
/// appointments to the next run.
#[derive(Debug)]
pub struct SendNotificationsUseCase {
    pub trigger: RunTrigger,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StoreError(anyhow::Error),
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationsUseCase {
    type Response = RunSummary;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();
        info!("Starting notifications run triggered by {}", self.trigger);

        let admin = ctx
            .repos
            .users
            .find_admin()
            .await
            .map_err(UseCaseErrors::StoreError)?;
        let run = NotificationRun::new(ctx, now, admin.as_ref());

        let mut summary = RunSummary::default();
        for window in ReminderWindow::ALL.iter() {
            run.process_window(*window, &mut summary)
                .await
                .map_err(UseCaseErrors::StoreError)?;
        }

        Ok(summary)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(LogRunSummary)]
    }
}

struct NotificationRun<'a> {
    now: i64,
    tz: Tz,
    appointments: &'a dyn IAppointmentRepo,
    claims: ClaimCoordinator<'a>,
    email: EmailDispatcher<'a>,
    push: PushDispatcher<'a>,
    sms: SmsDispatcher<'a>,
    admin: Option<&'a User>,
}

impl<'a> NotificationRun<'a> {
    fn new(ctx: &'a NotifierContext, now: i64, admin: Option<&'a User>) -> Self {
        let timeout = ctx.config.provider_timeout;
        Self {
            now,
            tz: ctx.config.timezone,
            appointments: ctx.repos.appointments.as_ref(),
            claims: ClaimCoordinator::new(ctx.repos.appointments.as_ref()),
            email: EmailDispatcher::new(ctx.providers.email.as_ref(), timeout),
            push: PushDispatcher::new(
                ctx.providers.push.as_ref(),
                ctx.repos.push_subscriptions.as_ref(),
                timeout,
                &ctx.config.app_url,
            ),
            sms: SmsDispatcher::new(ctx.providers.sms.as_ref(), timeout),
            admin,
        }
    }

    async fn process_window(
        &self,
        window: ReminderWindow,
        summary: &mut RunSummary,
    ) -> anyhow::Result<()> {
        let span = window.interval(self.now, &self.tz);
        let query = candidates_query(window, &span, &self.tz);
        let candidates = self.appointments.find_candidates(&query).await?;
        debug!(
            "Found {} candidates for the {} window",
            candidates.len(),
            window
        );

        for appointment in &candidates {
            let starts_at = match appointment.starts_at(&self.tz) {
                Ok(starts_at) => starts_at,
                Err(e) => {
                    warn!(
                        "Skipping appointment {} with date {} and time {}: {}",
                        appointment.id, appointment.date, appointment.time, e
                    );
                    summary.skipped += 1;
                    continue;
                }
            };
            if !span.contains(starts_at) {
                continue;
            }

            self.process_appointment(window, appointment, summary)
                .await?;
        }

        Ok(())
    }

    async fn process_appointment(
        &self,
        window: ReminderWindow,
        appointment: &Appointment,
        summary: &mut RunSummary,
    ) -> anyhow::Result<()> {
        let details = AppointmentDetails::new(appointment);

        let notification_flag = window.notification_flag();
        if self
            .claims
            .try_claim(appointment, window, notification_flag)
            .await?
        {
            summary.record_claim(window);
            let (emails_sent, push) = futures::join!(
                self.email.dispatch(window, appointment, &details),
                self.push.dispatch(window, appointment, &details)
            );
            summary.emails_sent += emails_sent;
            summary.push_delivered += push.delivered;
            summary.subscriptions_removed += push.removed;
        }

        if let Some(sms_flag) = window.sms_flag() {
            if self.claims.try_claim(appointment, window, sms_flag).await? {
                summary.sms_sent += self
                    .sms
                    .dispatch(window, appointment, &details, self.admin)
                    .await;
            }
        }

        Ok(())
    }
}

fn local_date(ts: i64, tz: &Tz) -> NaiveDate {
    tz.timestamp_millis(ts).naive_local().date()
}

/// The store filters on calendar dates only, the exact instants are checked
/// against `span` afterwards
fn candidates_query(window: ReminderWindow, span: &TimeSpan, tz: &Tz) -> AppointmentQuery {
    AppointmentQuery {
        from_date: local_date(span.get_start(), tz),
        to_date: local_date(span.get_end(), tz),
        statuses: window.eligible_statuses(),
        unsent_flags: window.flags(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salon_notifier_domain::{
        AppointmentStatus, Contact, PushSubscription, ReminderFlag, UserRole, ID,
    };
    use salon_notifier_infra::{
        Config, InMemoryEmailProvider, InMemoryPushProvider, InMemorySmsProvider, Providers,
        Repos, StaticTimeSys,
    };
    use std::{sync::Arc, time::Duration};

    // 2021-03-14T12:00:00Z
    const NOW: i64 = 1615723200000;

    struct Fakes {
        email: Arc<InMemoryEmailProvider>,
        sms: Arc<InMemorySmsProvider>,
        push: Arc<InMemoryPushProvider>,
    }

    fn setup_with_sms(sms: InMemorySmsProvider) -> (NotifierContext, Fakes) {
        let email = Arc::new(InMemoryEmailProvider::new());
        let sms = Arc::new(sms);
        let push = Arc::new(InMemoryPushProvider::new());

        let mut config = Config::new();
        config.timezone = Tz::UTC;
        config.app_url = "https://salon.example".into();
        config.provider_timeout = Duration::from_secs(1);

        let ctx = NotifierContext {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(StaticTimeSys(NOW)),
            providers: Providers {
                email: email.clone(),
                sms: sms.clone(),
                push: push.clone(),
            },
        };
        (ctx, Fakes { email, sms, push })
    }

    fn setup() -> (NotifierContext, Fakes) {
        setup_with_sms(InMemorySmsProvider::new())
    }

    fn contact(email: Option<&str>, phone: Option<&str>) -> Contact {
        Contact {
            user_id: Some(ID::default()),
            name: None,
            email: email.map(String::from),
            phone: phone.map(String::from),
        }
    }

    async fn insert_appointment(
        ctx: &NotifierContext,
        date: (i32, u32, u32),
        time: &str,
        status: AppointmentStatus,
    ) -> Appointment {
        let mut appointment =
            Appointment::new(NaiveDate::from_ymd(date.0, date.1, date.2), time, status);
        appointment.client = Some(contact(Some("a@x.com"), Some("+4790000001")));
        appointment.barber = Some(contact(Some("b@x.com"), Some("+4790000002")));
        appointment.service_name = Some("Skin fade".into());
        ctx.repos.appointments.insert(&appointment).await.unwrap();
        appointment
    }

    async fn subscribe(ctx: &NotifierContext, contact: &Option<Contact>, endpoint: &str) {
        let user_id = contact.as_ref().and_then(|c| c.user_id.clone()).unwrap();
        ctx.repos
            .push_subscriptions
            .insert(&PushSubscription::new(user_id, endpoint, "p256dh", "auth"))
            .await
            .unwrap();
    }

    async fn run(ctx: &NotifierContext) -> RunSummary {
        let usecase = SendNotificationsUseCase {
            trigger: RunTrigger::JobScheduler,
        };
        execute(usecase, ctx).await.unwrap()
    }

    async fn flag(ctx: &NotifierContext, appointment: &Appointment, flag: ReminderFlag) -> bool {
        ctx.repos
            .appointments
            .find(&appointment.id)
            .await
            .unwrap()
            .flags
            .is_sent(flag)
    }

    #[actix_web::main]
    #[test]
    async fn standard_day_before_reminder() {
        let (ctx, fakes) = setup();
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "12:00", AppointmentStatus::Confirmed).await;
        subscribe(&ctx, &appointment.client, "https://push/client").await;
        subscribe(&ctx, &appointment.barber, "https://push/barber").await;

        let summary = run(&ctx).await;

        assert_eq!(summary.reminders_24h, 1);
        assert_eq!(summary.sent_count(), 1);
        assert_eq!(summary.sms_sent, 0);
        assert_eq!(summary.emails_sent, 2);
        assert_eq!(summary.push_delivered, 2);

        let mut emailed = fakes
            .email
            .sent()
            .into_iter()
            .map(|m| m.to)
            .collect::<Vec<_>>();
        emailed.sort();
        assert_eq!(emailed, vec!["a@x.com".to_string(), "b@x.com".to_string()]);
        assert_eq!(fakes.push.attempts().len(), 2);
        assert!(fakes.sms.sent().is_empty());

        assert!(flag(&ctx, &appointment, ReminderFlag::Notification24h).await);
        assert!(flag(&ctx, &appointment, ReminderFlag::Sms24h).await);
        assert!(!flag(&ctx, &appointment, ReminderFlag::Notification12h).await);
    }

    #[actix_web::main]
    #[test]
    async fn pending_appointment_gets_confirmation_sms() {
        let (ctx, fakes) = setup();
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "12:30", AppointmentStatus::Pending).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.reminders_24h, 1);
        assert_eq!(summary.sms_sent, 1);
        let sent = fakes.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+4790000001");
        assert!(sent[0].body.contains("Reply YES to confirm"));
        assert!(flag(&ctx, &appointment, ReminderFlag::Sms24h).await);
    }

    #[actix_web::main]
    #[test]
    async fn unconfigured_sms_still_claims_the_flag() {
        let (ctx, fakes) = setup_with_sms(InMemorySmsProvider::unconfigured());
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "12:00", AppointmentStatus::Pending).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.sms_sent, 0);
        assert!(fakes.sms.sent().is_empty());
        assert!(flag(&ctx, &appointment, ReminderFlag::Sms24h).await);
        assert_eq!(fakes.email.sent().len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn two_hour_sms_skips_recipients_without_phone() {
        let (ctx, fakes) = setup();
        let mut admin = User::new(UserRole::Admin);
        admin.phone = None;
        ctx.repos.users.insert(&admin).await.unwrap();

        let mut appointment = Appointment::new(
            NaiveDate::from_ymd(2021, 3, 14),
            "14:00",
            AppointmentStatus::Confirmed,
        );
        appointment.client = Some(contact(Some("a@x.com"), None));
        appointment.barber = Some(contact(Some("b@x.com"), Some("+4790000002")));
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        let summary = run(&ctx).await;

        assert_eq!(summary.reminders_2h, 1);
        assert_eq!(summary.sms_sent, 1);
        let sent = fakes.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "+4790000002");
        assert!(flag(&ctx, &appointment, ReminderFlag::Sms2h).await);
        assert!(flag(&ctx, &appointment, ReminderFlag::Notification2h).await);
    }

    #[actix_web::main]
    #[test]
    async fn two_hour_sms_includes_admin_with_phone() {
        let (ctx, fakes) = setup();
        let mut admin = User::new(UserRole::Admin);
        admin.phone = Some("+4790000003".into());
        ctx.repos.users.insert(&admin).await.unwrap();
        insert_appointment(&ctx, (2021, 3, 14), "14:15", AppointmentStatus::Pending).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.sms_sent, 3);
        let mut to = fakes
            .sms
            .sent()
            .into_iter()
            .map(|s| s.to)
            .collect::<Vec<_>>();
        to.sort();
        assert_eq!(to, vec!["+4790000001", "+4790000002", "+4790000003"]);
    }

    #[actix_web::main]
    #[test]
    async fn repeated_runs_dispatch_once() {
        let (ctx, fakes) = setup();
        insert_appointment(&ctx, (2021, 3, 15), "12:00", AppointmentStatus::Pending).await;
        insert_appointment(&ctx, (2021, 3, 14), "14:00", AppointmentStatus::Confirmed).await;

        let first = run(&ctx).await;
        assert_eq!(first.reminders_24h, 1);
        assert_eq!(first.reminders_2h, 1);

        let second = run(&ctx).await;
        assert_eq!(second, RunSummary::default());
        assert_eq!(fakes.email.sent().len(), 4);
        // 24h confirmation to the client and 2h to client and barber
        assert_eq!(fakes.sms.sent().len(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn overlapping_runs_dispatch_once() {
        let (ctx, fakes) = setup();
        for time in &["12:00", "12:10", "12:20", "12:30"] {
            insert_appointment(&ctx, (2021, 3, 15), time, AppointmentStatus::Pending).await;
        }

        let first = SendNotificationsUseCase {
            trigger: RunTrigger::JobScheduler,
        };
        let second = SendNotificationsUseCase {
            trigger: RunTrigger::Http(TriggerSource::Open),
        };
        let (first, second) = futures::join!(execute(first, &ctx), execute(second, &ctx));
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_eq!(first.reminders_24h + second.reminders_24h, 4);
        assert_eq!(first.sms_sent + second.sms_sent, 4);
        assert_eq!(fakes.email.sent().len(), 8);
        assert_eq!(fakes.sms.sent().len(), 4);
    }

    #[actix_web::main]
    #[test]
    async fn window_bounds_are_inclusive() {
        let (ctx, _) = setup();
        // 24h window is [2021-03-15 12:00:00, 2021-03-15 13:00:00]
        let before =
            insert_appointment(&ctx, (2021, 3, 15), "11:59:59", AppointmentStatus::Confirmed).await;
        let at_start =
            insert_appointment(&ctx, (2021, 3, 15), "12:00", AppointmentStatus::Confirmed).await;
        let at_end =
            insert_appointment(&ctx, (2021, 3, 15), "13:00", AppointmentStatus::Confirmed).await;
        let after =
            insert_appointment(&ctx, (2021, 3, 15), "13:00:01", AppointmentStatus::Confirmed).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.reminders_24h, 2);
        assert!(!flag(&ctx, &before, ReminderFlag::Notification24h).await);
        assert!(flag(&ctx, &at_start, ReminderFlag::Notification24h).await);
        assert!(flag(&ctx, &at_end, ReminderFlag::Notification24h).await);
        assert!(!flag(&ctx, &after, ReminderFlag::Notification24h).await);
    }

    #[actix_web::main]
    #[test]
    async fn failed_email_is_not_retried() {
        let (ctx, fakes) = setup();
        fakes.email.fail_for("a@x.com");
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "00:15", AppointmentStatus::Confirmed).await;
        // 12h window is [2021-03-15 00:00, 2021-03-15 01:00]

        let summary = run(&ctx).await;
        assert_eq!(summary.reminders_12h, 1);
        assert_eq!(summary.emails_sent, 1);
        assert!(flag(&ctx, &appointment, ReminderFlag::Notification12h).await);

        let summary = run(&ctx).await;
        assert_eq!(summary.reminders_12h, 0);
        assert_eq!(fakes.email.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn stale_push_subscriptions_are_removed() {
        let (ctx, fakes) = setup();
        let appointment =
            insert_appointment(&ctx, (2021, 3, 14), "12:40", AppointmentStatus::Confirmed).await;
        subscribe(&ctx, &appointment.client, "https://push/gone").await;
        subscribe(&ctx, &appointment.client, "https://push/alive").await;
        fakes.push.fail_with("https://push/gone", 410);

        let summary = run(&ctx).await;

        assert_eq!(summary.reminders_30m, 1);
        assert_eq!(summary.subscriptions_removed, 1);
        assert_eq!(summary.push_delivered, 1);
        let client_id = appointment.client.as_ref().and_then(|c| c.user_id.clone()).unwrap();
        let remaining = ctx
            .repos
            .push_subscriptions
            .find_by_user(&client_id)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].endpoint, "https://push/alive");
        assert_eq!(fakes.push.sent()[0].payload["data"]["urgent"], true);
    }

    #[actix_web::main]
    #[test]
    async fn thanks_clients_of_todays_completed_visits() {
        let (ctx, fakes) = setup();
        let done =
            insert_appointment(&ctx, (2021, 3, 14), "09:00", AppointmentStatus::Completed).await;
        let later =
            insert_appointment(&ctx, (2021, 3, 14), "13:00", AppointmentStatus::Completed).await;
        let yesterday =
            insert_appointment(&ctx, (2021, 3, 13), "09:00", AppointmentStatus::Completed).await;
        let no_show =
            insert_appointment(&ctx, (2021, 3, 14), "10:00", AppointmentStatus::NoShow).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.thank_you, 1);
        let sent = fakes.email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
        assert!(flag(&ctx, &done, ReminderFlag::ThankYou).await);
        assert!(!flag(&ctx, &later, ReminderFlag::ThankYou).await);
        assert!(!flag(&ctx, &yesterday, ReminderFlag::ThankYou).await);
        assert!(!flag(&ctx, &no_show, ReminderFlag::ThankYou).await);
    }

    #[actix_web::main]
    #[test]
    async fn skips_appointments_with_invalid_time() {
        let (ctx, fakes) = setup();
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "noon", AppointmentStatus::Confirmed).await;

        let summary = run(&ctx).await;

        assert_eq!(summary.sent_count(), 0);
        assert!(summary.skipped >= 1);
        assert!(fakes.email.sent().is_empty());
        assert!(!flag(&ctx, &appointment, ReminderFlag::Notification24h).await);
    }

    /// Serves the day before window and fails every later candidate lookup
    struct FailsAfterDayBefore {
        inner: Arc<dyn IAppointmentRepo>,
    }

    #[async_trait::async_trait]
    impl IAppointmentRepo for FailsAfterDayBefore {
        async fn insert(&self, appointment: &Appointment) -> anyhow::Result<()> {
            self.inner.insert(appointment).await
        }

        async fn find(&self, appointment_id: &ID) -> Option<Appointment> {
            self.inner.find(appointment_id).await
        }

        async fn find_candidates(
            &self,
            query: &AppointmentQuery,
        ) -> anyhow::Result<Vec<Appointment>> {
            if query.unsent_flags.contains(&ReminderFlag::Notification24h) {
                self.inner.find_candidates(query).await
            } else {
                Err(anyhow::anyhow!("connection to the store was lost"))
            }
        }

        async fn try_claim(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<bool> {
            self.inner.try_claim(appointment_id, flag).await
        }

        async fn set_flag(&self, appointment_id: &ID, flag: ReminderFlag) -> anyhow::Result<()> {
            self.inner.set_flag(appointment_id, flag).await
        }
    }

    #[actix_web::main]
    #[test]
    async fn store_failure_aborts_the_run_and_keeps_earlier_claims() {
        let (mut ctx, fakes) = setup();
        ctx.repos.appointments = Arc::new(FailsAfterDayBefore {
            inner: ctx.repos.appointments.clone(),
        });
        let appointment =
            insert_appointment(&ctx, (2021, 3, 15), "12:00", AppointmentStatus::Pending).await;

        let usecase = SendNotificationsUseCase {
            trigger: RunTrigger::JobScheduler,
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::StoreError(_))));

        assert!(flag(&ctx, &appointment, ReminderFlag::Notification24h).await);
        assert!(flag(&ctx, &appointment, ReminderFlag::Sms24h).await);
        assert_eq!(fakes.email.sent().len(), 2);
        assert_eq!(fakes.sms.sent().len(), 1);

        let err = handle_error(UseCaseErrors::StoreError(anyhow::anyhow!("lost")));
        assert_eq!(
            actix_web::ResponseError::status_code(&err),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn query_spans_midnight() {
        // 2021-03-14T23:30:00Z, the 30m window ends on the next day
        let now = 1615764600000;
        let window = ReminderWindow::ThirtyMinutes;
        let span = window.interval(now, &Tz::UTC);
        let query = candidates_query(window, &span, &Tz::UTC);
        assert_eq!(query.from_date, NaiveDate::from_ymd(2021, 3, 15));
        assert_eq!(query.to_date, NaiveDate::from_ymd(2021, 3, 15));

        let window = ReminderWindow::TwoHours;
        let span = window.interval(now - 60 * 60 * 1000, &Tz::UTC);
        let query = candidates_query(window, &span, &Tz::UTC);
        assert_eq!(query.from_date, NaiveDate::from_ymd(2021, 3, 15));
    }
}
