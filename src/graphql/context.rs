use crate::graphql::client::PlantsClient;

#[derive(Clone)]
pub struct GraphQLContext {
    pub plants_client: PlantsClient,
}

impl GraphQLContext {
    pub fn new(plants_client: PlantsClient) -> Self {
        Self { plants_client }
    }
}
