use csv::Writer;
use std::collections::BTreeSet;
use std::error::Error;
use std::ffi::OsStr;
use std::{collections::HashMap, path::PathBuf};

use tracing::info;

use super::eval::EpisodeStats;

// Logger class for logging episode data
pub trait Logger {
    // log a piece of data
    fn log(&mut self, data: LogItem);

    // dump everything logged so far
    fn dump(&self) -> Result<(), Box<dyn Error>>;

    // check whether logging is possible, e.g. whether the target
    // directory exists. if try_to_fix, then the Logger will try
    // to resolve the issue by creating the dir
    fn check_can_log(&self, try_to_fix: bool) -> Result<(), &str>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogData {
    String(String),
    Float(f32),
    Int(i32),
}

#[derive(Debug, Clone, Default)]
pub struct LogItem {
    items: HashMap<String, LogData>,
}

impl LogItem {
    pub fn push(mut self, k: String, v: LogData) -> Self {
        self.items.insert(k, v);

        self
    }
}

impl From<&EpisodeStats> for LogItem {
    fn from(value: &EpisodeStats) -> Self {
        LogItem::default()
            .push("ep_return".to_string(), LogData::Float(value.ret))
            .push("ep_len".to_string(), LogData::Int(value.len as i32))
            .push("status".to_string(), LogData::String(value.status.clone()))
    }
}

pub struct CsvLogger {
    overwrite: bool,
    dump_path: PathBuf,
    to_stdout: bool,
    data: Vec<LogItem>,
}

impl CsvLogger {
    pub fn new(dump_path: PathBuf, to_stdout: bool, overwrite: bool) -> Self {
        Self {
            dump_path,
            to_stdout,
            data: Vec::new(),
            overwrite,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Logger for CsvLogger {
    fn log(&mut self, data: LogItem) {
        if self.to_stdout {
            info!("{:?}", data.items);
        }

        if data.items.is_empty() {
            return;
        }

        self.data.push(data);
    }

    fn dump(&self) -> Result<(), Box<dyn Error>> {
        info!(
            "Dumping logs to {:?}. {} items to dump",
            self.dump_path,
            self.data.len()
        );

        let mut wtr = Writer::from_path(&self.dump_path)?;

        // union of all keys, in a stable order
        let headers: BTreeSet<&String> =
            self.data.iter().flat_map(|r| r.items.keys()).collect();

        wtr.write_record(&headers)?;

        for record in &self.data {
            let row: Vec<String> = headers
                .iter()
                .map(|key| match record.items.get(*key) {
                    Some(LogData::String(s)) => s.clone(),
                    Some(LogData::Float(f)) => f.to_string(),
                    Some(LogData::Int(i)) => i.to_string(),
                    None => String::new(),
                })
                .collect();
            wtr.write_record(&row)?;
        }

        wtr.flush()?;

        Ok(())
    }

    fn check_can_log(&self, try_to_fix: bool) -> Result<(), &str> {
        let parent = match self.dump_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => std::path::Path::new("."),
        };

        if self.dump_path.exists() && !self.overwrite {
            Err("logger dump file already exists")
        } else if self.dump_path.extension() != Some(OsStr::new("csv")) {
            Err("logger dump path should be a csv")
        } else if !parent.exists() {
            if try_to_fix {
                match std::fs::create_dir_all(parent) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Couldn't create directory"),
                }
            } else {
                Err("logger dump path dir does not exist")
            }
        } else {
            Ok(())
        }
    }
}
