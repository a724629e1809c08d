//! Common utils for integration tests
//!
//!

use copy_dir::copy_dir;
use error_stack::Result;
use murmur3::murmur3_32;
use serde_json::Value;
use std::{
    io::BufReader,
    path::{Path, PathBuf},
};
use stemplate::{error::StemplateError, *};

pub struct ItEnv {
    config: Config,
    dictionary: Dictionary,
    test_description: String,
    test_dir: PathBuf,
}

impl ItEnv {
    pub fn new(example_dir_name: &str, test_description: &str) -> Self {
        let test_description = test_description.to_string();
        let mut read = BufReader::new(test_description.as_bytes());
        let test_name = format!(
            "test-{}",
            murmur3_32(&mut read, test_description.len().try_into().unwrap()).unwrap()
        );
        // create test directory
        let root_path = Path::new("target/test_out");
        if !root_path.exists() {
            std::fs::create_dir_all(&root_path).unwrap();
        }
        let path = root_path.join(test_name);
        if path.exists() {
            std::fs::remove_dir_all(&path).unwrap();
        }

        // copy example directory to test directory
        copy_dir(example_dir_name, &path).unwrap();

        let mut config = Config::default();
        config.verbosity = Verbosity::Quiet;
        config.base_dir = path.clone();

        Self {
            test_description,
            test_dir: path,
            config,
            dictionary: Dictionary::new(),
        }
    }

    #[inline]
    pub fn execute<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self) -> (),
    {
        f(self)
    }

    #[inline]
    pub fn cfg(&mut self) -> &mut Config {
        &mut self.config
    }

    #[inline]
    pub fn set_value(&mut self, key: &str, value: Value) {
        self.dictionary.insert(key.to_string(), value);
    }

    #[inline]
    #[allow(dead_code)]
    pub fn set_dictionary(&mut self, dictionary: Dictionary) {
        self.dictionary = dictionary;
    }

    #[inline]
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.test_dir.join(file_name)
    }

    /// Run and return what was printed to the console
    pub fn run(&self) -> Result<String, StemplateError> {
        let mut console = Vec::new();
        Stemplate::run_with_console(self.config.clone(), &self.dictionary, &mut console)?;
        Ok(String::from_utf8(console).unwrap())
    }

    #[inline]
    #[allow(dead_code)]
    pub fn set_file(&self, file_name: &str, contents: &str) {
        let path = self.test_dir.join(file_name);
        std::fs::write(&path, contents).unwrap();
    }

    #[inline]
    #[allow(dead_code)]
    pub fn read_file(&self, file_name: &str) -> String {
        std::fs::read_to_string(self.test_dir.join(file_name)).unwrap()
    }

    pub fn assert_file_eq(&self, file_name: &str, expected_file_name: &str) {
        let expected_path = self.test_dir.join(expected_file_name);
        assert!(
            expected_path.exists(),
            "expected file `{}` does not exist in test `{}` ({})",
            expected_file_name,
            self.test_description,
            self.test_dir.display()
        );
        let actual_path = self.test_dir.join(file_name);
        assert!(
            actual_path.exists(),
            "expected output file `{}` does not exist in test `{}` ({})",
            file_name,
            self.test_description,
            self.test_dir.display()
        );
        let actual = std::fs::read(actual_path).unwrap();
        let expected = std::fs::read(expected_path).unwrap();
        assert_eq!(
            String::from_utf8_lossy(&actual),
            String::from_utf8_lossy(&expected),
            "file comparison failed in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }

    #[inline]
    pub fn assert_path_exists(&self, path_name: &str, exists: bool) {
        assert_eq!(
            exists,
            self.test_dir.join(path_name).exists(),
            "file existence test failed in test `{}` ({})",
            self.test_description,
            self.test_dir.display()
        );
    }
}

macro_rules! testit {
    ($test_name:ident, $fnonce:expr) => {
        #[test]
        #[allow(non_snake_case)]
        fn $test_name() {
            let dir = stringify!($test_name).replace("__", "/");
            let mut env = ItEnv::new(&dir, &dir);
            env.execute($fnonce);
        }
    };
    ($test_name:ident, $example_dir:literal, $fnonce:expr) => {
        #[test]
        #[allow(non_snake_case)]
        fn $test_name() {
            let mut env = ItEnv::new($example_dir, stringify!($test_name));
            env.execute($fnonce);
        }
    };
}

pub(crate) use testit;
