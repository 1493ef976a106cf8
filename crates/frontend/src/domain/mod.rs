pub mod a001_photo;
pub mod a002_hotel;
pub mod a003_wholesaler;
pub mod a004_date_restriction;
pub mod a005_route;
pub mod a006_service;
pub mod a007_trip;
