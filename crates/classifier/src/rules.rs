//! Static subsystem rule tables, one per framework label.
//!
//! Within a table, rules are evaluated by ascending `priority` (declaration
//! order breaks ties) and the first rule to match a path claims it. Broad
//! rules therefore carry higher priority numbers than the specific ones they
//! would otherwise swallow.

use crate::framework::FrameworkLabel;
use serde::Serialize;

/// Declarative rule that claims files for one named subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubsystemRule {
    pub name: &'static str,
    pub description: &'static str,
    /// Matched with [`crate::matches_pattern`]
    pub path_patterns: &'static [&'static str],
    /// Extensions (leading dot included); `None` accepts any extension
    pub allowed_extensions: Option<&'static [&'static str]>,
    /// Lower values are evaluated first
    pub priority: u32,
}

impl SubsystemRule {
    /// Human-readable summary of what this rule matches
    pub fn pattern_summary(&self) -> String {
        let patterns = self.path_patterns.join(", ");
        match self.allowed_extensions {
            Some(exts) => format!("{patterns} ({})", exts.join(", ")),
            None => patterns,
        }
    }
}

const JS_SOURCE: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"];
const STYLESHEETS: &[&str] = &[".css", ".scss", ".sass", ".less"];
const DOC_FORMATS: &[&str] = &[".md", ".mdx", ".rst", ".txt"];
const PYTHON: &[&str] = &[".py", ".pyi"];
const TEMPLATES: &[&str] = &[".html", ".htm", ".jinja", ".jinja2", ".j2"];

const DOC_PATTERNS: &[&str] = &[
    "docs/",
    "documentation/",
    "readme",
    "changelog",
    "contributing",
];

const TEST_PATTERNS: &[&str] = &["__tests__/", "tests/", "test/", "e2e/", "cypress/"];

const fn documentation_rule(priority: u32) -> SubsystemRule {
    SubsystemRule {
        name: "Documentation",
        description: "Guides, READMEs and project documentation",
        path_patterns: DOC_PATTERNS,
        allowed_extensions: Some(DOC_FORMATS),
        priority,
    }
}

const fn test_rule(priority: u32) -> SubsystemRule {
    SubsystemRule {
        name: "Tests",
        description: "Unit, integration and end-to-end tests",
        path_patterns: TEST_PATTERNS,
        allowed_extensions: None,
        priority,
    }
}

const REACT_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "Components",
        description: "Reusable UI components",
        path_patterns: &["src/components/", "components/"],
        allowed_extensions: Some(JS_SOURCE),
        priority: 1,
    },
    SubsystemRule {
        name: "Pages",
        description: "Top-level views and screens",
        path_patterns: &["src/pages/", "src/views/", "src/screens/"],
        allowed_extensions: Some(JS_SOURCE),
        priority: 2,
    },
    SubsystemRule {
        name: "Hooks",
        description: "Custom React hooks",
        path_patterns: &["src/hooks/", "hooks/"],
        allowed_extensions: None,
        priority: 3,
    },
    SubsystemRule {
        name: "State Management",
        description: "Stores, reducers and context providers",
        path_patterns: &["src/store/", "src/redux/", "src/context/", "src/state/"],
        allowed_extensions: None,
        priority: 4,
    },
    SubsystemRule {
        name: "Services",
        description: "API clients and data access",
        path_patterns: &["src/services/", "src/api/", "services/"],
        allowed_extensions: None,
        priority: 5,
    },
    SubsystemRule {
        name: "Utilities",
        description: "Shared helpers and utilities",
        path_patterns: &["src/utils/", "src/lib/", "src/helpers/", "utils/"],
        allowed_extensions: None,
        priority: 6,
    },
    SubsystemRule {
        name: "Styles",
        description: "Stylesheets, including component-level styles",
        path_patterns: &["src/styles/", "styles/", "src/components/", "src/"],
        allowed_extensions: Some(STYLESHEETS),
        priority: 7,
    },
    SubsystemRule {
        name: "Assets",
        description: "Static and public assets",
        path_patterns: &["public/", "src/assets/", "assets/"],
        allowed_extensions: None,
        priority: 8,
    },
    test_rule(9),
    documentation_rule(10),
];

const NEXTJS_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "API Routes",
        description: "Server-side API route handlers",
        path_patterns: &["pages/api/", "src/pages/api/", "app/api/", "src/app/api/"],
        allowed_extensions: None,
        priority: 1,
    },
    SubsystemRule {
        name: "App Router",
        description: "App directory routes, layouts and server components",
        path_patterns: &["app/", "src/app/"],
        allowed_extensions: None,
        priority: 2,
    },
    SubsystemRule {
        name: "Pages",
        description: "Pages router entries",
        path_patterns: &["pages/", "src/pages/"],
        allowed_extensions: None,
        priority: 3,
    },
    SubsystemRule {
        name: "Components",
        description: "Reusable UI components",
        path_patterns: &["components/", "src/components/"],
        allowed_extensions: Some(JS_SOURCE),
        priority: 4,
    },
    SubsystemRule {
        name: "Library",
        description: "Shared helpers, data fetching and server utilities",
        path_patterns: &["lib/", "src/lib/", "utils/", "src/utils/", "hooks/"],
        allowed_extensions: None,
        priority: 5,
    },
    SubsystemRule {
        name: "Middleware",
        description: "Edge middleware",
        path_patterns: &["middleware."],
        allowed_extensions: Some(JS_SOURCE),
        priority: 6,
    },
    SubsystemRule {
        name: "Styles",
        description: "Global and module stylesheets",
        path_patterns: &["styles/", "src/styles/", "components/"],
        allowed_extensions: Some(STYLESHEETS),
        priority: 7,
    },
    SubsystemRule {
        name: "Public Assets",
        description: "Files served as-is from the public directory",
        path_patterns: &["public/"],
        allowed_extensions: None,
        priority: 8,
    },
    test_rule(9),
    documentation_rule(10),
];

const SVELTE_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "Routes",
        description: "SvelteKit pages, layouts and endpoints",
        path_patterns: &["src/routes/"],
        allowed_extensions: None,
        priority: 1,
    },
    SubsystemRule {
        name: "Components",
        description: "Reusable Svelte components",
        path_patterns: &["src/lib/components/", "src/components/"],
        allowed_extensions: None,
        priority: 2,
    },
    SubsystemRule {
        name: "Stores",
        description: "Svelte stores and shared state",
        path_patterns: &["src/lib/stores/", "src/stores/"],
        allowed_extensions: None,
        priority: 3,
    },
    SubsystemRule {
        name: "Library",
        description: "Shared modules under $lib",
        path_patterns: &["src/lib/"],
        allowed_extensions: None,
        priority: 4,
    },
    SubsystemRule {
        name: "Static Assets",
        description: "Files served as-is",
        path_patterns: &["static/"],
        allowed_extensions: None,
        priority: 5,
    },
    test_rule(6),
    documentation_rule(7),
];

const FLASK_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "Application Core",
        description: "Application factory, entry scripts and settings",
        path_patterns: &["app.py", "wsgi.py", "run.py", "config.py", "app/__init__.py"],
        allowed_extensions: Some(PYTHON),
        priority: 1,
    },
    SubsystemRule {
        name: "Routes",
        description: "Views and blueprints",
        path_patterns: &["routes/", "views/", "blueprints/", "routes.py", "views.py"],
        allowed_extensions: Some(PYTHON),
        priority: 2,
    },
    SubsystemRule {
        name: "Models",
        description: "Database models",
        path_patterns: &["models/", "models.py"],
        allowed_extensions: Some(PYTHON),
        priority: 3,
    },
    SubsystemRule {
        name: "Templates",
        description: "Jinja templates",
        path_patterns: &["templates/"],
        allowed_extensions: Some(TEMPLATES),
        priority: 4,
    },
    SubsystemRule {
        name: "Static Assets",
        description: "Stylesheets, scripts and images",
        path_patterns: &["static/"],
        allowed_extensions: None,
        priority: 5,
    },
    SubsystemRule {
        name: "Migrations",
        description: "Database schema migrations",
        path_patterns: &["migrations/", "alembic/"],
        allowed_extensions: None,
        priority: 6,
    },
    test_rule(7),
    documentation_rule(8),
];

const FASTAPI_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "Application Core",
        description: "Application entry point",
        path_patterns: &["main.py", "app/main.py"],
        allowed_extensions: Some(PYTHON),
        priority: 1,
    },
    SubsystemRule {
        name: "API Routers",
        description: "Path operations grouped by router",
        path_patterns: &["routers/", "api/", "endpoints/", "routes/"],
        allowed_extensions: Some(PYTHON),
        priority: 2,
    },
    SubsystemRule {
        name: "Schemas",
        description: "Pydantic request/response schemas",
        path_patterns: &["schemas/", "schemas.py"],
        allowed_extensions: Some(PYTHON),
        priority: 3,
    },
    SubsystemRule {
        name: "Models",
        description: "ORM models",
        path_patterns: &["models/", "models.py"],
        allowed_extensions: Some(PYTHON),
        priority: 4,
    },
    SubsystemRule {
        name: "Database",
        description: "Sessions, CRUD helpers and migrations",
        path_patterns: &["db/", "database", "crud/", "crud.py", "alembic/", "migrations/"],
        allowed_extensions: None,
        priority: 5,
    },
    SubsystemRule {
        name: "Core",
        description: "Settings, security and dependencies",
        path_patterns: &["core/", "config", "settings", "dependencies"],
        allowed_extensions: Some(PYTHON),
        priority: 6,
    },
    SubsystemRule {
        name: "Services",
        description: "Business logic",
        path_patterns: &["services/"],
        allowed_extensions: None,
        priority: 7,
    },
    test_rule(8),
    documentation_rule(9),
];

const PYTHON_CLI_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "Entry Points",
        description: "Console entry points and argument parsing",
        path_patterns: &["__main__.py", "main.py", "cli", "bin/"],
        allowed_extensions: None,
        priority: 1,
    },
    SubsystemRule {
        name: "Commands",
        description: "Subcommand implementations",
        path_patterns: &["commands/", "command", "cmd/"],
        allowed_extensions: Some(PYTHON),
        priority: 2,
    },
    test_rule(3),
    SubsystemRule {
        name: "Core",
        description: "Library code behind the commands",
        path_patterns: &["src/", "lib/"],
        allowed_extensions: Some(PYTHON),
        priority: 4,
    },
    SubsystemRule {
        name: "Packaging",
        description: "Build metadata and dependency pins",
        path_patterns: &[
            "pyproject.toml",
            "setup.py",
            "setup.cfg",
            "poetry.lock",
            "requirements",
        ],
        allowed_extensions: None,
        priority: 5,
    },
    documentation_rule(6),
];

const PYTHON_LIB_RULES: &[SubsystemRule] = &[
    test_rule(1),
    SubsystemRule {
        name: "Examples",
        description: "Usage examples",
        path_patterns: &["examples/", "example/"],
        allowed_extensions: None,
        priority: 2,
    },
    SubsystemRule {
        name: "Package Source",
        description: "Importable package modules",
        path_patterns: &["src/", "lib/"],
        allowed_extensions: Some(PYTHON),
        priority: 3,
    },
    SubsystemRule {
        name: "Packaging",
        description: "Build metadata and dependency pins",
        path_patterns: &[
            "pyproject.toml",
            "setup.py",
            "setup.cfg",
            "poetry.lock",
            "requirements",
            "manifest.in",
        ],
        allowed_extensions: None,
        priority: 4,
    },
    documentation_rule(5),
];

const MULTI_FRAMEWORK_RULES: &[SubsystemRule] = &[
    SubsystemRule {
        name: "React Examples",
        description: "Example apps built with React",
        path_patterns: &["examples/react"],
        allowed_extensions: None,
        priority: 1,
    },
    SubsystemRule {
        name: "Vue Examples",
        description: "Example apps built with Vue",
        path_patterns: &["examples/vue"],
        allowed_extensions: None,
        priority: 2,
    },
    SubsystemRule {
        name: "Svelte Examples",
        description: "Example apps built with Svelte",
        path_patterns: &["examples/svelte"],
        allowed_extensions: None,
        priority: 3,
    },
    SubsystemRule {
        name: "Angular Examples",
        description: "Example apps built with Angular",
        path_patterns: &["examples/angular"],
        allowed_extensions: None,
        priority: 4,
    },
    SubsystemRule {
        name: "Other Examples",
        description: "Examples for remaining frameworks",
        path_patterns: &["examples/"],
        allowed_extensions: None,
        priority: 5,
    },
    SubsystemRule {
        name: "Core Library",
        description: "Framework-agnostic core shared by all integrations",
        path_patterns: &["src/", "packages/", "lib/"],
        allowed_extensions: None,
        priority: 6,
    },
    test_rule(7),
    documentation_rule(8),
];

/// Rule table for `framework`, in declaration order.
pub fn rules_for(framework: FrameworkLabel) -> &'static [SubsystemRule] {
    match framework {
        FrameworkLabel::MultiFramework => MULTI_FRAMEWORK_RULES,
        FrameworkLabel::Nextjs => NEXTJS_RULES,
        FrameworkLabel::React => REACT_RULES,
        FrameworkLabel::Svelte => SVELTE_RULES,
        FrameworkLabel::Flask => FLASK_RULES,
        FrameworkLabel::Fastapi => FASTAPI_RULES,
        FrameworkLabel::PythonCli => PYTHON_CLI_RULES,
        FrameworkLabel::PythonLib => PYTHON_LIB_RULES,
        FrameworkLabel::Unknown => &[],
    }
}

/// Rules sorted by priority; the sort is stable so declaration order breaks ties.
pub(crate) fn ordered_rules(rules: &[SubsystemRule]) -> Vec<&SubsystemRule> {
    let mut ordered: Vec<&SubsystemRule> = rules.iter().collect();
    ordered.sort_by_key(|rule| rule.priority);
    ordered
}
