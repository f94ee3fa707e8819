//! Head Service - fills the slots of the shared head template.

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, BuildPhase, ports::Filesystem},
    domain::{
        BuildLayout, FaviconHead, HeadSlot, Substitutions, Template,
        favicon,
        head::{self, OPEN_GRAPH_IMAGE},
    },
    error::KilnResult,
};

use super::stylesheet_service::persisted_sheets;
use super::template_service::render_to;

pub struct HeadService<'a> {
    fs: &'a dyn Filesystem,
    layout: &'a BuildLayout,
}

impl<'a> HeadService<'a> {
    pub fn new(fs: &'a dyn Filesystem, layout: &'a BuildLayout) -> Self {
        Self { fs, layout }
    }

    /// Rewrite `views/~head.tpl` in place with every slot filled.
    ///
    /// Returns the favicon markup used, which may be partial.
    #[instrument(skip_all)]
    pub fn generate(&self) -> KilnResult<FaviconHead> {
        let path = self.layout.head_template();
        if !self.fs.is_file(&path) {
            return Err(ApplicationError::MissingPrecondition {
                phase: BuildPhase::Head,
                what: "head template",
                path,
            }
            .into());
        }

        let blueprint = head::prepare_blueprint(&self.fs.read_to_string(&path)?);
        let template = Template::compile(&blueprint);

        let favicons = self.favicon_head();
        if !favicons.is_complete() {
            warn!(missing = ?favicons.missing, "Using partial favicon markup");
        }

        let sheets = persisted_sheets(self.fs, &self.layout.css_dir())?;
        let values = Substitutions::new()
            .with(HeadSlot::FaviconResources.name(), favicons.markup.as_str())
            .with(HeadSlot::OpenGraph.name(), self.open_graph())
            .with(HeadSlot::StyleSheets.name(), head::stylesheet_head(&sheets));

        render_to(self.fs, &template, &path, &values)?;
        info!(stylesheets = sheets.len(), "Head template populated");
        Ok(favicons)
    }

    fn favicon_head(&self) -> FaviconHead {
        let dir = self.layout.favicon_dir();
        favicon::head_elements(|file| self.fs.is_file(&dir.join(file)))
    }

    fn open_graph(&self) -> String {
        let image = self.layout.favicon_dir().join(OPEN_GRAPH_IMAGE);
        head::open_graph(self.fs.is_file(&image))
    }
}
