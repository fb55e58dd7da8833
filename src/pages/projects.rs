//! Projects listing page generation

use maud::{Markup, html};

use crate::assets::PROJECTS_CSS;
use crate::components::badge::tech_tag;
use crate::components::layout::{page_wrapper, stylesheets};
use crate::components::metadata::{count_label, site_header};
use crate::components::nav::{Tab, tabs};
use crate::markup::is_safe_source;
use crate::record::Project;

/// Generates the projects page
///
/// Lists each project with its description, technology tags, and a link
/// to the repository when one is set.
pub fn generate(owner: &str, github: Option<&str>, projects: &[Project]) -> Markup {
    page_wrapper(
        Tab::Projects.label(),
        owner,
        &stylesheets("", &[PROJECTS_CSS]),
        html! {
            (site_header(owner, github, ""))
            (tabs(Some(Tab::Projects), ""))

            main class="card" {
                div class="card-header" {
                    h2 { "Projects" }
                    (count_label(projects.len(), "project", "projects"))
                }

                @if projects.is_empty() {
                    p class="empty-state" { "No projects yet" }
                }

                @for project in projects {
                    div class="project" {
                        div class="project-header" {
                            h3 class="project-name" { (project.name) }
                            @if let Some(url) = project.url.as_deref().filter(|u| is_safe_source(u)) {
                                a class="project-link" href=(url) target="_blank" rel="noopener" { "View on GitHub →" }
                            }
                        }
                        @if !project.description.is_empty() {
                            p class="project-description" { (project.description) }
                        }
                        @if !project.tech.is_empty() {
                            div class="project-tech" {
                                @for tech in &project.tech {
                                    (tech_tag(tech))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
