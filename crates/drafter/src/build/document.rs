use log::{debug, info, warn};

use drafter_core::{canvas::Canvas, document::Document};

use crate::{
    build::{
        IdentityMap, ImportReport, ItemFailure, TemplateResolver, build_connector, build_shape,
        shape::shape_label,
    },
    config::ImportConfig,
    error::DrafterError,
};

/// Builds a whole [`Document`] on a canvas.
///
/// Shapes are built in declaration order before any connector, so connectors
/// can refer to shapes declared after them. Ids are scoped to one call of
/// [`DocumentBuilder::build`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentBuilder<'a> {
    config: &'a ImportConfig,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(config: &'a ImportConfig) -> Self {
        Self { config }
    }

    /// Builds `document` on `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Canvas`] when the canvas document or its first
    /// page cannot be obtained. Every later failure is recorded in the
    /// returned [`ImportReport`].
    pub fn build<C>(
        &self,
        canvas: &mut C,
        document: &Document,
    ) -> Result<ImportReport, DrafterError>
    where
        C: Canvas + ?Sized,
    {
        info!(
            template:? = document.template(),
            shapes = document.shapes().len(),
            connectors = document.connectors().len();
            "Building document",
        );

        let handle = canvas.create_document(document.template())?;
        let page = canvas.first_page(handle)?;
        let mut identities = IdentityMap::new();

        let mut report = ImportReport::new(handle, page);
        let mut resolver = TemplateResolver::new(self.config);

        if let Some(title) = document.name() {
            if let Err(err) = canvas.set_document_title(handle, title) {
                warn!(title, err:%; "Document title not set");
                report.record_failure(ItemFailure::Title(err));
            }
        }

        for (index, shape) in document.shapes().iter().enumerate() {
            match build_shape(
                canvas,
                page,
                &mut resolver,
                &mut identities,
                shape,
                index,
            ) {
                Ok(built) => {
                    report.record_shape(built.from_master());
                    for error in built.property_failures() {
                        report.record_failure(ItemFailure::Property {
                            shape: shape_label(shape, index),
                            error: error.clone(),
                        });
                    }
                }
                Err(err) => {
                    warn!(err:%; "Shape not built");
                    report.record_failure(err);
                }
            }
        }

        for connector in document.connectors() {
            match build_connector(canvas, page, &mut identities, connector) {
                Ok(Some(_)) => report.record_connector(),
                Ok(None) => report.record_skipped_connector(),
                Err(err) => {
                    warn!(err:%; "Connector not built");
                    report.record_failure(err);
                }
            }
        }

        if self.config.resize_page() {
            if let Err(err) = canvas.resize_page_to_contents(page) {
                warn!(err:%; "Page not resized");
                report.record_failure(ItemFailure::ResizePage(err));
            }
        }

        let opened = resolver.take_opened();
        if self.config.release_stencils() {
            for (stencil, stencil_handle) in opened {
                match canvas.close_document(stencil_handle) {
                    Ok(()) => {
                        debug!(stencil = stencil.as_str(); "Released stencil");
                        report.record_released(stencil);
                    }
                    Err(err) => {
                        warn!(stencil = stencil.as_str(), err:%; "Stencil not released");
                        report.record_failure(ItemFailure::ReleaseStencil { stencil, error: err });
                    }
                }
            }
        }

        report.set_identities(identities.into_entries());

        info!(
            shapes = report.shapes_created(),
            connectors = report.connectors_created(),
            skipped = report.connectors_skipped(),
            failures = report.failures().len();
            "Document built",
        );
        Ok(report)
    }
}
