use cluster_dns_core::domain::{ClusterDescriptor, ResourceTag};
use cluster_dns_core::RoutingError;
use cluster_dns_lambda::adapters::cluster_directory::ClusterDirectory;
use cluster_dns_lambda::config::HandlerConfig;
use cluster_dns_lambda::handlers::cluster_event::{handle_cluster_event, RoutingOutcome};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct EcsClusterDirectory {
    ecs_client: aws_sdk_ecs::Client,
}

impl ClusterDirectory for EcsClusterDirectory {
    fn describe_cluster(&self, name: &str) -> Result<ClusterDescriptor, RoutingError> {
        let cluster_name = name.to_string();
        let client = self.ecs_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .describe_clusters()
                    .clusters(cluster_name)
                    .send()
                    .await
                    .map_err(|error| {
                        RoutingError::Upstream(format!("failed to describe cluster: {error}"))
                    })
            })
        })?;

        let cluster = output
            .clusters()
            .first()
            .ok_or_else(|| RoutingError::NotFound {
                what: "cluster",
                key: name.to_string(),
            })?;

        Ok(ClusterDescriptor {
            cluster_name: cluster.cluster_name().unwrap_or(name).to_string(),
            cluster_arn: cluster.cluster_arn().map(ToString::to_string),
            status: cluster.status().map(ToString::to_string),
        })
    }

    fn list_resource_tags(&self, resource_arn: &str) -> Result<Vec<ResourceTag>, RoutingError> {
        let arn = resource_arn.to_string();
        let client = self.ecs_client.clone();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .list_tags_for_resource()
                    .resource_arn(arn)
                    .send()
                    .await
                    .map_err(|error| {
                        RoutingError::Upstream(format!("failed to list cluster tags: {error}"))
                    })
            })
        })?;

        // ECS tags always carry both fields; anything else is skipped.
        Ok(output
            .tags()
            .iter()
            .filter_map(|tag| Some(ResourceTag::new(tag.key()?, tag.value()?)))
            .collect())
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<RoutingOutcome, Error> {
    let config = HandlerConfig::from_env();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let directory = EcsClusterDirectory {
        ecs_client: aws_sdk_ecs::Client::new(&aws_config),
    };

    handle_cluster_event(event.payload, &config, &directory)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cluster_dns_lambda=info,cluster_dns_handler=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().json().with_target(false))
        .init();

    lambda_runtime::run(service_fn(handle_request)).await
}
