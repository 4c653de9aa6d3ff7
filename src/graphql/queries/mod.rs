use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Plant;

pub struct Query;

#[Object]
impl Query {
    /// All plants with their photos, as listed by the REST API
    async fn plants(&self, ctx: &Context<'_>) -> Result<Vec<Plant>> {
        let context = ctx.data::<GraphQLContext>()?;
        let plants = context.plants_client.plants_or_empty().await;

        Ok(plants.into_iter().map(Plant::from).collect())
    }
}
