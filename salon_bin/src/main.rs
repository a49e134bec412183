use std::sync::Arc;

use dao_impl_sqlite::{
    booking::BookingDaoImpl, calendar_day::CalendarDayDaoImpl, treatment::TreatmentDaoImpl,
    TransactionDaoImpl, TransactionImpl,
};
use sqlx::SqlitePool;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

const DEFAULT_DATABASE_URL: &str = "sqlite:./salon.sqlite3?mode=rwc";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

type Transaction = TransactionImpl;
type TransactionDao = TransactionDaoImpl;
type BookingDao = BookingDaoImpl;
type TreatmentDao = TreatmentDaoImpl;
type CalendarDayDao = CalendarDayDaoImpl;

type ConfigService = service_impl::config::ConfigServiceImpl;
type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;

pub struct TreatmentServiceDependencies;
impl service_impl::treatment::TreatmentServiceDeps for TreatmentServiceDependencies {
    type Transaction = Transaction;
    type TreatmentDao = TreatmentDao;
    type TransactionDao = TransactionDao;
}
type TreatmentService =
    service_impl::treatment::TreatmentServiceImpl<TreatmentServiceDependencies>;

pub struct CalendarServiceDependencies;
impl service_impl::calendar::CalendarServiceDeps for CalendarServiceDependencies {
    type Transaction = Transaction;
    type CalendarDayDao = CalendarDayDao;
    type ConfigService = ConfigService;
    type TransactionDao = TransactionDao;
}
type CalendarService = service_impl::calendar::CalendarServiceImpl<CalendarServiceDependencies>;

pub struct AvailabilityServiceDependencies;
impl service_impl::availability::AvailabilityServiceDeps for AvailabilityServiceDependencies {
    type Transaction = Transaction;
    type BookingDao = BookingDao;
    type TreatmentService = TreatmentService;
    type CalendarService = CalendarService;
    type ConfigService = ConfigService;
    type TransactionDao = TransactionDao;
}
type AvailabilityService =
    service_impl::availability::AvailabilityServiceImpl<AvailabilityServiceDependencies>;

pub struct BookingServiceDependencies;
impl service_impl::booking::BookingServiceDeps for BookingServiceDependencies {
    type Transaction = Transaction;
    type BookingDao = BookingDao;
    type AvailabilityService = AvailabilityService;
    type TreatmentService = TreatmentService;
    type ConfigService = ConfigService;
    type ClockService = ClockService;
    type UuidService = UuidService;
    type TransactionDao = TransactionDao;
}
type BookingService = service_impl::booking::BookingServiceImpl<BookingServiceDependencies>;

#[derive(Clone)]
pub struct RestStateImpl {
    availability_service: Arc<AvailabilityService>,
    booking_service: Arc<BookingService>,
}

impl rest::RestStateDef for RestStateImpl {
    type AvailabilityService = AvailabilityService;
    type BookingService = BookingService;

    fn availability_service(&self) -> Arc<Self::AvailabilityService> {
        self.availability_service.clone()
    }
    fn booking_service(&self) -> Arc<Self::BookingService> {
        self.booking_service.clone()
    }
}

impl RestStateImpl {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let transaction_dao = Arc::new(TransactionDao::new(pool.clone()));
        let booking_dao = Arc::new(BookingDao::new(pool.clone()));
        let config_service = Arc::new(service_impl::config::ConfigServiceImpl);
        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);

        let treatment_service = Arc::new(TreatmentService {
            treatment_dao: Arc::new(TreatmentDao::new(pool.clone())),
            transaction_dao: transaction_dao.clone(),
        });
        let calendar_service = Arc::new(CalendarService {
            calendar_day_dao: Arc::new(CalendarDayDao::new(pool.clone())),
            config_service: config_service.clone(),
            transaction_dao: transaction_dao.clone(),
        });
        let availability_service = Arc::new(AvailabilityService {
            booking_dao: booking_dao.clone(),
            treatment_service: treatment_service.clone(),
            calendar_service,
            config_service: config_service.clone(),
            transaction_dao: transaction_dao.clone(),
        });
        let booking_service = Arc::new(BookingService {
            booking_dao,
            availability_service: availability_service.clone(),
            treatment_service,
            config_service,
            clock_service,
            uuid_service,
            transaction_dao,
        });
        Self {
            availability_service,
            booking_service,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .pretty()
        .with_file(true)
        .finish();
    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
    tracing::info!("Salon backend version: {}", version);
    dotenvy::dotenv().ok();

    // Reject bad settings before serving.
    service_impl::config::load_config(|name| std::env::var(name).ok())
        .expect("Invalid salon configuration");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let pool = Arc::new(
        SqlitePool::connect(&database_url)
            .await
            .expect("Could not connect to database"),
    );
    dao_impl_sqlite::run_migrations(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let address =
        std::env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string());
    rest::start_server(RestStateImpl::new(pool), &address).await
}
