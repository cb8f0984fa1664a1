/// Use cases module containing application business logic orchestration
mod show_dependencies;

pub use show_dependencies::ShowDependenciesUseCase;
