// src/reader/sync_reader.rs
use crate::config::ReaderOptions;
use crate::error::{NexError, Result};
use crate::header::{FileHeader, VariableHeader};
use crate::raw_data::RawDataReader;
use crate::reader::selection;
use crate::reader::source::NexSource;
use crate::records::{
    check_ordered, ContinuousRecord, EventRecord, Interval, IntervalRecord, MarkerRecord,
    NeuronRecord, WaveformRecord,
};
use crate::types::{CaseSensitivity, VariableType};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace, warn};

#[cfg(feature = "mmap")]
use memmap2::Mmap;
#[cfg(feature = "mmap")]
use std::io::Cursor;

/// Trait alias for Read + Seek
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}

/// Synchronous NEX file reader
///
/// The file header and variable index are decoded when the reader is
/// created; payloads are decoded on demand by seeking to each variable's
/// data offset. Methods that decode payloads take `&mut self` because they
/// move the stream position; open one reader per thread for parallel reads.
pub struct NexReader<R: ReadSeek> {
    pub(crate) file: R,
    base_offset: u64,
    stream_len: u64,
    header: FileHeader,
    variables: Vec<VariableHeader>,
    options: ReaderOptions,
}

/// Constructors for standard file I/O
impl NexReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ReaderOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening NEX file");
        let file = File::open(path)?;
        Self::from_file(file, options)
    }

    /// Open from a path or from a handle that is already open.
    ///
    /// ```no_run
    /// use nex_rs::{NexReader, NexSource, ReaderOptions};
    /// use std::fs::File;
    ///
    /// let by_path = NexReader::from_source("session.nex", ReaderOptions::default()).unwrap();
    ///
    /// let handle = File::open("session.nex").unwrap();
    /// let by_handle = NexReader::from_source(NexSource::Handle(handle), ReaderOptions::default()).unwrap();
    /// assert_eq!(by_path.header(), by_handle.header());
    /// ```
    pub fn from_source(source: impl Into<NexSource>, options: ReaderOptions) -> Result<Self> {
        match source.into() {
            NexSource::Path(path) => Self::open_with_options(path, options),
            NexSource::Handle(file) => Self::from_file(file, options),
        }
    }

    fn from_file(file: File, options: ReaderOptions) -> Result<Self> {
        let reader = BufReader::with_capacity(options.buffer_capacity, file);
        NexReader::from_reader_with_options(reader, options)
    }
}

/// Constructor for memory-mapped file I/O (requires "mmap" feature)
#[cfg(feature = "mmap")]
impl NexReader<Cursor<Mmap>> {
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_mmap_with_options(path, ReaderOptions::default())
    }

    pub fn open_mmap_with_options(path: impl AsRef<Path>, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "memory-mapping NEX file");
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        NexReader::from_reader_with_options(Cursor::new(mmap), options)
    }
}

/// Generic implementation for all NexReader variants
impl<R: ReadSeek> NexReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ReaderOptions::default())
    }

    /// Wrap a stream positioned at the first byte of a NEX structure.
    ///
    /// The current position becomes offset zero for all payload offsets, so
    /// a NEX file embedded inside a larger stream decodes the same way.
    pub fn from_reader_with_options(mut reader: R, options: ReaderOptions) -> Result<Self> {
        let base_offset = reader.stream_position()?;
        let end = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(base_offset))?;
        let stream_len = end.saturating_sub(base_offset);

        let header = Self::parse_header(&mut reader, base_offset, stream_len, &options)?;
        let variables = Self::parse_variables(&mut reader, base_offset, &header)?;

        debug!(
            variables = variables.len(),
            bytes = stream_len,
            "decoded NEX variable index"
        );

        Ok(NexReader {
            file: reader,
            base_offset,
            stream_len,
            header,
            variables,
            options,
        })
    }

    fn parse_header(
        reader: &mut R,
        base_offset: u64,
        stream_len: u64,
        options: &ReaderOptions,
    ) -> Result<FileHeader> {
        // The signature is checked before anything else is read.
        let mut magic = [0u8; 4];
        RawDataReader::read_block(reader, &mut magic, "NEX signature", base_offset)?;
        FileHeader::check_magic(&magic)?;

        let mut buf = [0u8; FileHeader::SIZE];
        buf[..4].copy_from_slice(&magic);
        RawDataReader::read_block(reader, &mut buf[4..], "file header", base_offset)?;
        let header = FileHeader::parse(&buf)?;

        if header.index_end() > stream_len {
            return Err(NexError::InvalidFormat(format!(
                "header declares {} variables but the file holds only {} bytes",
                header.num_vars, stream_len
            )));
        }

        if header.is_beta_version() {
            if options.reject_beta_versions {
                return Err(NexError::InvalidFormat(format!(
                    "beta file version {} is not supported",
                    header.version
                )));
            }
            warn!(version = header.version, "NEX file uses a beta format version");
        }

        debug!(
            version = header.version,
            frequency = header.frequency,
            num_vars = header.num_vars,
            "decoded NEX file header"
        );
        Ok(header)
    }

    fn parse_variables(
        reader: &mut R,
        base_offset: u64,
        header: &FileHeader,
    ) -> Result<Vec<VariableHeader>> {
        let mut buf = vec![0u8; header.num_vars as usize * VariableHeader::SIZE];
        RawDataReader::read_block(
            reader,
            &mut buf,
            "variable index",
            base_offset + FileHeader::SIZE as u64,
        )?;

        buf.chunks_exact(VariableHeader::SIZE)
            .enumerate()
            .map(|(i, entry)| VariableHeader::parse(entry, i, header.version))
            .collect()
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Owned copy of the file header. Repeated calls return identical values.
    pub fn read_header(&self) -> FileHeader {
        self.header.clone()
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// All index entries in on-disk order
    pub fn variables(&self) -> &[VariableHeader] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Index entries in on-disk order, optionally restricted to one type.
    ///
    /// No payload is decoded.
    pub fn list_variables(&self, type_filter: Option<VariableType>) -> Vec<VariableHeader> {
        self.variables
            .iter()
            .filter(|v| type_filter.map_or(true, |t| v.var_type == t))
            .cloned()
            .collect()
    }

    /// Names of all interval variables in on-disk order. Duplicates are kept.
    pub fn list_interval_names(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter(|v| v.var_type == VariableType::Interval)
            .map(|v| v.name.clone())
            .collect()
    }

    /// First entry of any type named `name`
    pub fn find_variable(
        &self,
        name: &str,
        case: impl Into<CaseSensitivity>,
    ) -> Result<&VariableHeader> {
        let case = case.into();
        self.variables
            .iter()
            .find(|v| case.names_match(&v.name, name))
            .ok_or_else(|| NexError::not_found(None, name))
    }

    /// Read the interval tables of every interval variable named `name`.
    ///
    /// `indices`, when given, are 0-based positions among the interval
    /// variables and further restrict the search. Records come back in
    /// index-table order, one per matching variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use nex_rs::NexReader;
    ///
    /// let mut reader = NexReader::open("session.nex").unwrap();
    /// for record in reader.read_intervals("REM", false, None).unwrap() {
    ///     for interval in &record.intervals {
    ///         println!("{:.3} - {:.3} ({:.3} s)", interval.start, interval.end, interval.duration());
    ///     }
    /// }
    /// ```
    pub fn read_intervals(
        &mut self,
        name: &str,
        case: impl Into<CaseSensitivity>,
        indices: Option<&[usize]>,
    ) -> Result<Vec<IntervalRecord>> {
        let case = case.into();
        let candidates = selection::positions_of(&self.variables, VariableType::Interval);
        let mut selected = selection::select(&candidates, indices)?;
        selected.sort_unstable();
        selected.dedup();

        let matched = selection::matching_name(&self.variables, &selected, name, case);
        if matched.is_empty() {
            return Err(NexError::not_found(Some(VariableType::Interval), name));
        }

        let records = matched
            .into_iter()
            .map(|p| self.decode_at(p, IntervalRecord::decode))
            .collect::<Result<Vec<_>>>()?;

        if self.options.check_interval_order {
            for record in &records {
                check_ordered(record)?;
            }
        }
        Ok(records)
    }

    /// All intervals named `name`, flattened into one ordered table
    pub fn read_interval_times(
        &mut self,
        name: &str,
        case: impl Into<CaseSensitivity>,
    ) -> Result<Vec<Interval>> {
        Ok(self
            .read_intervals(name, case, None)?
            .into_iter()
            .flat_map(|record| record.intervals)
            .collect())
    }

    /// Read neuron variables. `indices` are 0-based positions among the
    /// neuron variables; `None` reads all of them.
    pub fn read_neurons(&mut self, indices: Option<&[usize]>) -> Result<Vec<NeuronRecord>> {
        self.read_selected(VariableType::Neuron, indices, NeuronRecord::decode)
    }

    pub fn read_events(&mut self, indices: Option<&[usize]>) -> Result<Vec<EventRecord>> {
        self.read_selected(VariableType::Event, indices, EventRecord::decode)
    }

    pub fn read_markers(&mut self, indices: Option<&[usize]>) -> Result<Vec<MarkerRecord>> {
        self.read_selected(VariableType::Marker, indices, MarkerRecord::decode)
    }

    pub fn read_continuous(&mut self, indices: Option<&[usize]>) -> Result<Vec<ContinuousRecord>> {
        self.read_selected(VariableType::Continuous, indices, ContinuousRecord::decode)
    }

    pub fn read_waveforms(&mut self, indices: Option<&[usize]>) -> Result<Vec<WaveformRecord>> {
        self.read_selected(VariableType::Waveform, indices, WaveformRecord::decode)
    }

    /// Give back the underlying stream
    pub fn into_inner(self) -> R {
        self.file
    }

    fn read_selected<T, F>(
        &mut self,
        var_type: VariableType,
        indices: Option<&[usize]>,
        decode: F,
    ) -> Result<Vec<T>>
    where
        F: Fn(&mut R, &VariableHeader, f64, u64) -> Result<T>,
    {
        let candidates = selection::positions_of(&self.variables, var_type);
        let selected = selection::select(&candidates, indices)?;
        selected
            .into_iter()
            .map(|p| self.decode_at(p, &decode))
            .collect()
    }

    /// Seek to the payload of index entry `position` and decode it.
    fn decode_at<T, F>(&mut self, position: usize, decode: F) -> Result<T>
    where
        F: FnOnce(&mut R, &VariableHeader, f64, u64) -> Result<T>,
    {
        let var = &self.variables[position];
        let size = var.payload_size()?;
        let start = var.data_offset as u64;
        if start.saturating_add(size) > self.stream_len {
            return Err(NexError::InvalidFormat(format!(
                "payload of '{}' ({} bytes at offset {}) extends past the end of the file ({} bytes)",
                var.name, size, start, self.stream_len
            )));
        }

        let offset = self.base_offset + start;
        trace!(
            name = %var.name,
            var_type = %var.var_type,
            offset,
            count = var.count,
            "decoding variable payload"
        );
        self.file.seek(SeekFrom::Start(offset))?;
        decode(&mut self.file, var, self.header.frequency, offset)
    }
}
