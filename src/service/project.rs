//! Maps project discovery and summaries

use crate::cloud::{CloudApi, DirectoryProject};
use crate::domain::Project;
use crate::error::Result;
use crate::util::async_filter;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{info, warn};

use super::capability::CapabilityChecker;
use super::keys::KeyService;

/// How a summary fetches per-project keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// One project at a time, in directory order
    #[default]
    Sequential,
    /// Every project's keys requested at once
    Concurrent,
}

impl FetchMode {
    pub fn from_concurrent(concurrent: bool) -> Self {
        if concurrent {
            FetchMode::Concurrent
        } else {
            FetchMode::Sequential
        }
    }
}

pub struct ProjectService<A: CloudApi> {
    api: Arc<A>,
    checker: CapabilityChecker<A>,
    keys: KeyService<A>,
}

impl<A: CloudApi> ProjectService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            checker: CapabilityChecker::new(api.clone()),
            keys: KeyService::new(api.clone()),
            api,
        }
    }

    /// Projects visible to the caller that have a Maps API enabled.
    ///
    /// Returned in directory order with empty `keys`.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let response = self.api.list_directory_projects().await?;
        let projects: Vec<Project> = response
            .projects
            .into_iter()
            .filter_map(to_project)
            .collect();

        info!("Found {} projects", projects.len());

        let checker = &self.checker;
        let maps_projects = async_filter(projects, |project| {
            let resource = project.resource_name();
            async move { checker.has_capability(&resource).await }
        })
        .await?;

        info!("{} projects have Maps enabled", maps_projects.len());
        Ok(maps_projects)
    }

    /// Maps projects with their keys filled in.
    pub async fn project_summary(&self, mode: FetchMode) -> Result<Vec<Project>> {
        let mut projects = self.list_projects().await?;

        match mode {
            FetchMode::Sequential => {
                for project in projects.iter_mut() {
                    project.keys = self.keys.list_keys(&project.number).await?;
                }
            }
            FetchMode::Concurrent => {
                let all_keys = try_join_all(
                    projects
                        .iter()
                        .map(|project| self.keys.list_keys(&project.number)),
                )
                .await?;
                for (project, keys) in projects.iter_mut().zip(all_keys) {
                    project.keys = keys;
                }
            }
        }

        Ok(projects)
    }
}

fn to_project(entry: DirectoryProject) -> Option<Project> {
    match entry.project_number {
        Some(number) if !number.is_empty() => Some(Project::new(entry.name, number)),
        _ => {
            warn!(
                project_id = entry.project_id.as_deref().unwrap_or_default(),
                "Skipping directory entry without a project number"
            );
            None
        }
    }
}
