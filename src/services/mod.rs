pub mod composition_service;
