use phf::phf_map;

/// A named prompt template bound to the configured model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub key: &'static str,
    pub role: &'static str,
    pub goal: &'static str,
    pub backstory: &'static str,
}

impl Agent {
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

pub const DATA_CLEANER: Agent = Agent {
    key: "data_cleaner",
    role: "Data Cleaner",
    goal: "Summarize data issues in <=2 sentences: missing %, dtype notes, obvious scaling needs.",
    backstory: "You are a data scientist who quickly inspects and summarizes data issues.",
};

pub const ALGORITHM_SELECTOR: Agent = Agent {
    key: "algorithm_selector",
    role: "Algorithm Selector",
    goal: "Recommend exactly one algorithm. Respond ONLY as JSON with keys task, model, reason. \
           Set task to classification or regression based on target characteristics; \
           set model to the precise sklearn class name; keep reason under 12 words.",
    backstory: "You are a machine learning expert who always chooses the best estimator.",
};

pub const CODE_GENERATOR: Agent = Agent {
    key: "code_generator",
    role: "Code Generator",
    goal: "Produce a full runnable Python script in triple backticks. \
           Use only the estimator recommended by the Algorithm Selector. \
           Include preprocessing, training, metrics, and a plot.",
    backstory: "You are a Python ML engineer who writes clean, ready-to-run code.",
};

/// Pipeline order.
pub const ANALYSIS_AGENTS: [Agent; 3] = [DATA_CLEANER, ALGORITHM_SELECTOR, CODE_GENERATOR];

static AGENTS_BY_KEY: phf::Map<&'static str, Agent> = phf_map! {
    "data_cleaner" => DATA_CLEANER,
    "algorithm_selector" => ALGORITHM_SELECTOR,
    "code_generator" => CODE_GENERATOR,
};

pub fn find_agent(key: &str) -> Option<&'static Agent> {
    AGENTS_BY_KEY.get(key)
}
