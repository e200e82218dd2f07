use tracing::{debug, info, info_span, instrument};

use crate::image_pipeline::{
    canonical::{CanonicalSink, Canonicalizer},
    checksum::{ChecksumEngine, Digest},
    common::error::{PipelineError, Result},
    decoders,
    driver::{ChecksumConfig, PipelineTimings, Timer},
    projection::ProjectionSums,
    sniff::FormatTag,
};

/// Outcome of a successful checksum run, with the facts gathered along the way.
#[derive(Debug, Clone)]
pub struct ChecksumReport {
    pub digest: Digest,
    pub format: FormatTag,
    pub width: u32,
    pub height: u32,
    pub timings: PipelineTimings,
}

/// Detect, decode, canonicalize and hash one in-memory image.
///
/// The pipeline holds only its configuration, so one instance can be shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct ChecksumPipeline {
    config: ChecksumConfig,
}

impl ChecksumPipeline {
    pub fn new(config: ChecksumConfig) -> Self {
        Self { config }
    }

    pub fn checksum(&self, input_data: &[u8]) -> Result<Digest> {
        self.checksum_report(input_data).map(|report| report.digest)
    }

    pub fn checksum_report(&self, input_data: &[u8]) -> Result<ChecksumReport> {
        self.run(input_data, |_, _| ()).map(|(report, ())| report)
    }

    /// Checksums the image and gathers its row and column luma sums in the same pass.
    pub fn checksum_with_projection(&self, input_data: &[u8]) -> Result<(ChecksumReport, ProjectionSums)> {
        self.run(input_data, ProjectionSums::new)
    }

    pub fn projection_sums(&self, input_data: &[u8]) -> Result<ProjectionSums> {
        self.checksum_with_projection(input_data).map(|(_, sums)| sums)
    }

    /// Runs every stage, streaming canonical rows to the hasher and to the
    /// sink `make_sink` builds for the decoded dimensions.
    #[instrument(skip(self, input_data, make_sink), fields(input_size = input_data.len()))]
    fn run<S, F>(&self, input_data: &[u8], make_sink: F) -> Result<(ChecksumReport, S)>
    where
        S: CanonicalSink,
        F: FnOnce(u32, u32) -> S,
    {
        if input_data.is_empty() {
            return Err(PipelineError::Empty);
        }
        let mut timings = PipelineTimings::new();

        let timer = Timer::start("detect");
        let format = {
            let _span = info_span!("detect").entered();
            FormatTag::detect(input_data).ok_or(PipelineError::UnsupportedFormat)?
        };
        timings.record(timer);
        debug!("Detected {} container", format);

        let timer = Timer::start("decode");
        let raw_image = {
            let _span = info_span!("decode", format = %format).entered();
            decoders::decode(format, input_data, self.config.limits())
                .map_err(|e| PipelineError::from_decode(format, e))?
        };
        timings.record(timer);

        let timer = Timer::start("canonicalize_hash");
        let (digest, sink) = {
            let _span = info_span!(
                "canonicalize_hash",
                width = raw_image.width(),
                height = raw_image.height()
            )
            .entered();
            let mut engine =
                ChecksumEngine::for_image(self.config.seed, raw_image.width(), raw_image.height());
            let mut sink = make_sink(raw_image.width(), raw_image.height());
            Canonicalizer::stream(&raw_image, &mut (&mut engine, &mut sink));
            (engine.finalize(), sink)
        };
        timings.record(timer);

        info!(
            format = %format,
            width = raw_image.width(),
            height = raw_image.height(),
            "Checksum complete: {}",
            digest
        );

        let report = ChecksumReport {
            digest,
            format,
            width: raw_image.width(),
            height: raw_image.height(),
            timings,
        };
        Ok((report, sink))
    }

    pub fn config(&self) -> &ChecksumConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChecksumConfig) {
        self.config = config;
    }
}

/// Checksums one encoded image with the default configuration.
pub fn checksum(input_data: &[u8]) -> Result<Digest> {
    ChecksumPipeline::default().checksum(input_data)
}
