pub mod activities_api_service;
