use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the voting backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::game::create_game,
        crate::routes::game::get_game,
        crate::routes::game::get_results,
        crate::routes::game::get_stylesheet,
        crate::routes::play::join_game,
        crate::routes::play::forward_to_unvoted,
        crate::routes::play::get_item,
        crate::routes::play::vote_item,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::game::CreateGameRequest,
            crate::dto::game::VoteItemInput,
            crate::dto::game::ChoiceInput,
            crate::dto::game::GameSummary,
            crate::dto::game::VoteItemSummary,
            crate::dto::game::ChoiceSummary,
            crate::dto::game::PlayerSummary,
            crate::dto::play::JoinRequest,
            crate::dto::play::JoinFormResponse,
            crate::dto::play::VoteRequest,
            crate::dto::play::ItemView,
            crate::dto::play::VoteRejectedResponse,
            crate::dto::play::GameResults,
            crate::dto::play::ItemResult,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "game", description = "Game definitions, stylesheets and results"),
        (name = "play", description = "Joining games and voting on items"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/healthcheck",
            "/games",
            "/games/{key}",
            "/games/{key}/results",
            "/games/{key}/style.css",
            "/games/{key}/join",
            "/games/{key}/item",
            "/games/{key}/item/{item}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}
