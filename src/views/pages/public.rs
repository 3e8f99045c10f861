use std::fmt::{self, Write};

use itertools::Itertools;
use tracing::{debug, error};

use crate::client::ClubClient;
use crate::error::ClubError;
use crate::model::{Event, GroupInfo, Image, Project, DATE_INPUT_FORMAT};
use crate::views::{Mount, Notice, Refresh};

/// Read-only page: about section, events and projects.
#[derive(Debug, Default)]
pub struct PublicPage {
    pub group_info: Option<GroupInfo>,
    pub projects: Vec<Project>,
    pub events: Vec<Event>,
    mount: Mount,
    errors: Vec<Notice>,
}

impl PublicPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self) -> &Mount {
        &self.mount
    }

    /// Problems from the last load. Sections that failed keep their
    /// previous content.
    pub fn errors(&self) -> &[Notice] {
        &self.errors
    }

    /// Fetch the three sections concurrently. They resolve in any order and
    /// each one is applied on its own.
    pub async fn load(&mut self, client: &ClubClient) -> Refresh {
        let fetch = async {
            tokio::join!(
                client.list_projects(),
                client.list_events(),
                client.get_group_info()
            )
        };
        let Some((projects, events, group_info)) = self.mount.run(fetch).await else {
            debug!("public page unmounted, discarding fetched data");
            return Refresh::Cancelled;
        };

        self.errors.clear();
        match projects {
            Ok(projects) => self.projects = projects,
            Err(e) => self.record("projects", e),
        }
        match events {
            Ok(events) => self.events = events,
            Err(e) => self.record("events", e),
        }
        match group_info {
            Ok(info) => self.group_info = info,
            Err(e) => self.record("group info", e),
        }
        Refresh::Applied
    }

    fn record(&mut self, section: &str, e: ClubError) {
        error!(section, error = %e, "error fetching public data");
        self.errors
            .push(Notice::error(format!("Could not load {section}: {e}")));
    }

    /// Plain-text rendering of the page, with asset and download links
    /// resolved against the client's origin.
    pub fn render(&self, client: &ClubClient) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_page(&mut out, client);
        out
    }

    fn write_page(&self, out: &mut String, client: &ClubClient) -> fmt::Result {
        writeln!(out, "== About ==")?;
        match &self.group_info {
            Some(info) => {
                if !info.name.is_empty() {
                    writeln!(out, "{}", info.name)?;
                }
                writeln!(out, "Description: {}", info.description)?;
                writeln!(out, "Contact: {}", info.contact)?;
            }
            None => writeln!(out, "No information.")?,
        }

        writeln!(out, "\n== Events ==")?;
        if self.events.is_empty() {
            writeln!(out, "No events.")?;
        }
        for event in &self.events {
            writeln!(
                out,
                "{} ({})",
                event.name,
                event.date.format(DATE_INPUT_FORMAT)
            )?;
            writeln!(out, "  {}", event.description)?;
            write_images(out, client, &event.images)?;
        }

        writeln!(out, "\n== Projects ==")?;
        if self.projects.is_empty() {
            writeln!(out, "No projects.")?;
        }
        for project in &self.projects {
            match project.year {
                Some(year) => writeln!(out, "{} ({year})", project.name)?,
                None => writeln!(out, "{}", project.name)?,
            }
            writeln!(out, "  Technologies: {}", project.technologies)?;
            writeln!(out, "  {}", project.description)?;
            write_images(out, client, &project.images)?;

            if project.executable.is_empty() {
                writeln!(out, "  No downloads available.")?;
                continue;
            }
            writeln!(out, "  Downloads:")?;
            for exe in &project.executable {
                writeln!(
                    out,
                    "    {} (v{}): {}",
                    exe.platform,
                    exe.version,
                    client.executable_download_url(exe.id)
                )?;
            }
        }
        Ok(())
    }
}

fn write_images(out: &mut String, client: &ClubClient, images: &[Image]) -> fmt::Result {
    if images.is_empty() {
        return Ok(());
    }
    let urls = images
        .iter()
        .map(|image| client.asset_url(&image.file_path))
        .join(", ");
    writeln!(out, "  Images: {urls}")
}
