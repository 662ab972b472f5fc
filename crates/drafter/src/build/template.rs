use log::{debug, trace};

use drafter_core::{
    canvas::{Canvas, DocumentHandle, OpenMode, PageHandle, ShapeHandle},
    geometry::Point,
};

use crate::config::ImportConfig;

/// A way of finding a stencil document by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilStrategy {
    /// Use an open document whose name or title contains the stencil name.
    OpenDocuments,
    /// Open the stencil name as given.
    OpenByName,
    /// Open the stencil name with each configured extension appended.
    OpenWithExtension,
}

/// Drops masters from stencils located by an ordered list of strategies.
///
/// The first strategy that yields a stencil wins. Stencils this resolver
/// opens are remembered so they can be released once the import is done;
/// documents that were already open are never remembered.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    strategies: Vec<StencilStrategy>,
    extensions: Vec<String>,
    mode: OpenMode,
    opened: Vec<(String, DocumentHandle)>,
}

impl TemplateResolver {
    /// Creates a resolver using all strategies in their default order.
    pub fn new(config: &ImportConfig) -> Self {
        Self {
            strategies: vec![
                StencilStrategy::OpenDocuments,
                StencilStrategy::OpenByName,
                StencilStrategy::OpenWithExtension,
            ],
            extensions: config.stencil_extensions().to_vec(),
            mode: config.stencil_open_mode(),
            opened: Vec::new(),
        }
    }

    /// Replaces the strategy list.
    pub fn with_strategies(mut self, strategies: impl Into<Vec<StencilStrategy>>) -> Self {
        self.strategies = strategies.into();
        self
    }

    pub fn strategies(&self) -> &[StencilStrategy] {
        &self.strategies
    }

    /// Returns the stencils opened by this resolver, in opening order.
    pub fn opened(&self) -> &[(String, DocumentHandle)] {
        &self.opened
    }

    /// Hands over the opened stencils, leaving the list empty.
    pub fn take_opened(&mut self) -> Vec<(String, DocumentHandle)> {
        std::mem::take(&mut self.opened)
    }

    /// Drops `master` from `stencil` onto `page`, centered on `at`.
    ///
    /// Returns `None` when the stencil cannot be located, the master is not
    /// in it, or the drop fails.
    pub fn resolve<C>(
        &mut self,
        canvas: &mut C,
        page: PageHandle,
        stencil: &str,
        master: &str,
        at: Point,
    ) -> Option<ShapeHandle>
    where
        C: Canvas + ?Sized,
    {
        let Some(document) = self.locate_stencil(canvas, stencil) else {
            debug!(stencil; "Stencil not found");
            return None;
        };

        let master_handle = match canvas.master(document, master) {
            Ok(handle) => handle,
            Err(err) => {
                debug!(stencil, master, err:%; "Master lookup failed");
                return None;
            }
        };

        match canvas.drop_master(page, master_handle, at) {
            Ok(shape) => {
                trace!(stencil, master, shape:% = shape; "Dropped master");
                Some(shape)
            }
            Err(err) => {
                debug!(stencil, master, err:%; "Drop failed");
                None
            }
        }
    }

    fn locate_stencil<C>(&mut self, canvas: &mut C, stencil: &str) -> Option<DocumentHandle>
    where
        C: Canvas + ?Sized,
    {
        for strategy in self.strategies.clone() {
            let found = match strategy {
                StencilStrategy::OpenDocuments => canvas
                    .open_documents()
                    .into_iter()
                    .find(|doc| doc.name.contains(stencil) || doc.title.contains(stencil))
                    .map(|doc| doc.handle),
                StencilStrategy::OpenByName => self.open(canvas, stencil),
                StencilStrategy::OpenWithExtension => {
                    let extensions = self.extensions.clone();
                    extensions
                        .iter()
                        .find_map(|ext| self.open(canvas, &format!("{stencil}{ext}")))
                }
            };

            if let Some(document) = found {
                trace!(stencil, strategy:? = strategy, document:% = document; "Located stencil");
                return Some(document);
            }
        }
        None
    }

    fn open<C>(&mut self, canvas: &mut C, name: &str) -> Option<DocumentHandle>
    where
        C: Canvas + ?Sized,
    {
        let was_open: Vec<DocumentHandle> = canvas
            .open_documents()
            .into_iter()
            .map(|doc| doc.handle)
            .collect();

        match canvas.open_stencil(name, self.mode) {
            Ok(document) => {
                if !was_open.contains(&document)
                    && !self.opened.iter().any(|(_, handle)| *handle == document)
                {
                    self.opened.push((name.to_string(), document));
                }
                Some(document)
            }
            Err(err) => {
                trace!(name, err:%; "Stencil did not open");
                None
            }
        }
    }
}
