use std::sync::Arc;
use crate::domain::ports::{
    BookingRepository, Clock, HotelRepository, PageRepository, RoomRepository, UserRepository,
};
use crate::domain::services::{
    auth_service::AuthService, availability::AvailabilityService,
    booking_service::BookingService, page_tree::PageTreeService,
};
use crate::config::Config;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub page_repo: Arc<dyn PageRepository>,
    pub clock: Arc<dyn Clock>,
    pub auth_service: Arc<AuthService>,
    pub availability_service: Arc<AvailabilityService>,
    pub booking_service: Arc<BookingService>,
    pub page_tree_service: Arc<PageTreeService>,
    pub templates: Arc<Tera>,
}

/// Repository set for one storage backend.
pub struct Repositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub hotel_repo: Arc<dyn HotelRepository>,
    pub room_repo: Arc<dyn RoomRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub page_repo: Arc<dyn PageRepository>,
}

impl AppState {
    pub fn new(config: Config, repos: Repositories, clock: Arc<dyn Clock>, templates: Arc<Tera>) -> Self {
        let auth_service = Arc::new(AuthService::new(repos.user_repo.clone(), &config));
        let availability_service = Arc::new(AvailabilityService::new(
            repos.hotel_repo.clone(),
            repos.room_repo.clone(),
            repos.booking_repo.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            repos.room_repo.clone(),
            repos.booking_repo.clone(),
            clock.clone(),
        ));
        let page_tree_service = Arc::new(PageTreeService::new(repos.page_repo.clone(), repos.hotel_repo.clone()));

        Self {
            config,
            user_repo: repos.user_repo,
            hotel_repo: repos.hotel_repo,
            room_repo: repos.room_repo,
            booking_repo: repos.booking_repo,
            page_repo: repos.page_repo,
            clock,
            auth_service,
            availability_service,
            booking_service,
            page_tree_service,
            templates,
        }
    }
}
