use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "javascript";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig {
    pub key: &'static str,
    pub id: u32,              // Judge0 language id
    pub name: &'static str,
    pub extension: &'static str,
    pub editor_id: &'static str,
    pub template: &'static str,
}

pub static LANGUAGES: [LanguageConfig; 7] = [
    LanguageConfig {
        key: "javascript",
        id: 63,
        name: "JavaScript (Node.js)",
        extension: "js",
        editor_id: "javascript",
        template: r#"// JavaScript Solution
function solution(input) {
    // Parse input
    const lines = input.trim().split('\n');

    // Your code here

    return result;
}

// Read input and run solution
const input = require('fs').readFileSync(0, 'utf-8');
console.log(solution(input));
"#,
    },
    LanguageConfig {
        key: "python",
        id: 71,
        name: "Python 3",
        extension: "py",
        editor_id: "python",
        template: r#"# Python Solution
def solution():
    # Read input
    # n = int(input())
    # arr = list(map(int, input().split()))

    # Your code here

    pass

if __name__ == "__main__":
    solution()
"#,
    },
    LanguageConfig {
        key: "cpp",
        id: 54,
        name: "C++ (GCC 9.2.0)",
        extension: "cpp",
        editor_id: "cpp",
        template: r#"#include <bits/stdc++.h>
using namespace std;

int main() {
    ios_base::sync_with_stdio(false);
    cin.tie(NULL);

    // Read input
    // int n;
    // cin >> n;

    // Your code here

    return 0;
}
"#,
    },
    LanguageConfig {
        key: "java",
        id: 62,
        name: "Java (OpenJDK 13)",
        extension: "java",
        editor_id: "java",
        template: r#"import java.util.*;
import java.io.*;

public class Main {
    public static void main(String[] args) {
        Scanner sc = new Scanner(System.in);

        // Read input
        // int n = sc.nextInt();

        // Your code here

        sc.close();
    }
}
"#,
    },
    LanguageConfig {
        key: "typescript",
        id: 74,
        name: "TypeScript",
        extension: "ts",
        editor_id: "typescript",
        template: r#"// TypeScript Solution
function solution(input: string): string {
    const lines = input.trim().split('\n');

    // Your code here

    return "";
}

// For local testing
declare const require: any;
const input = require('fs').readFileSync(0, 'utf-8');
console.log(solution(input));
"#,
    },
    LanguageConfig {
        key: "go",
        id: 60,
        name: "Go (1.13)",
        extension: "go",
        editor_id: "go",
        template: r#"package main

import (
    "bufio"
    "fmt"
    "os"
)

func main() {
    reader := bufio.NewReader(os.Stdin)

    // Read input
    // var n int
    // fmt.Fscan(reader, &n)
    _ = reader

    // Your code here
    fmt.Println("Hello, World!")
}
"#,
    },
    LanguageConfig {
        key: "rust",
        id: 73,
        name: "Rust (1.40)",
        extension: "rs",
        editor_id: "rust",
        template: r#"use std::io::{self, BufRead};

fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Read input
    // let n: i32 = lines.next().unwrap().unwrap().parse().unwrap();
    let _ = lines;

    // Your code here
    println!("Hello, World!");
}
"#,
    },
];

lazy_static! {
    static ref LANGUAGES_BY_ID: HashMap<u32, &'static LanguageConfig> =
        LANGUAGES.iter().map(|l| (l.id, l)).collect();
}

pub fn by_id(id: u32) -> Option<&'static LanguageConfig> {
    LANGUAGES_BY_ID.get(&id).copied()
}
