use crate::agents::{self, Agent};
use crate::consts;
use crate::errors::AnalysisError;
use crate::llm_client::LLMClientTrait;
use crate::models::request::Message;

/// One step of a crew. `context` lists the indices of earlier tasks whose
/// outputs are included in this task's prompt.
#[derive(Debug, Clone)]
pub struct Task {
    pub agent: Agent,
    pub description: String,
    pub expected_output: String,
    pub context: Vec<usize>,
}

impl Task {
    pub fn new(agent: Agent, description: impl Into<String>, expected_output: &str) -> Self {
        Self {
            agent,
            description: description.into(),
            expected_output: expected_output.to_string(),
            context: vec![],
        }
    }

    pub fn with_context(mut self, context: &[usize]) -> Self {
        self.context = context.to_vec();
        self
    }

    pub(crate) fn messages(&self, context: &[&str]) -> Vec<Message> {
        let mut prompt = format!(
            "Current Task: {}\n\nThis is the expected criteria for your final answer: {}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            self.description, self.expected_output
        );
        if !context.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            prompt.push_str(&context.join(consts::CONTEXT_SEPARATOR));
        }
        prompt.push_str("\n\nBegin!");

        vec![Message::system(self.agent.system_prompt()), Message::user(prompt)]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutput {
    pub agent_key: &'static str,
    pub role: &'static str,
    pub raw: String,
}

/// Runs its tasks strictly in order, feeding earlier outputs forward.
#[derive(Debug, Clone)]
pub struct Crew {
    tasks: Vec<Task>,
}

impl Crew {
    pub fn new(tasks: Vec<Task>) -> Result<Self, AnalysisError> {
        for (idx, task) in tasks.iter().enumerate() {
            if let Some(bad) = task.context.iter().find(|c| **c >= idx) {
                return Err(AnalysisError::ConfigError(format!(
                    "task {} ({}) cannot use output of task {}",
                    idx, task.agent.role, bad
                )));
            }
        }
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The first failing task aborts the whole run.
    pub async fn kickoff(
        &self,
        client: &dyn LLMClientTrait,
    ) -> Result<Vec<TaskOutput>, AnalysisError> {
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());

        for (idx, task) in self.tasks.iter().enumerate() {
            let context: Vec<&str> = task
                .context
                .iter()
                .map(|c| outputs[*c].raw.as_str())
                .collect();
            let messages = task.messages(&context);

            log::info!("task {}: {} started", idx + 1, task.agent.role);
            log::debug!("task {} prompt: {:?}", idx + 1, messages);

            let raw = client.chat(messages).await.map_err(|e| {
                log::error!("task {}: {} failed: {}", idx + 1, task.agent.role, e);
                e
            })?;

            log::info!(
                "task {}: {} finished ({} chars)",
                idx + 1,
                task.agent.role,
                raw.len()
            );

            outputs.push(TaskOutput {
                agent_key: task.agent.key,
                role: task.agent.role,
                raw,
            });
        }

        Ok(outputs)
    }
}

/// Cleaner → selector → generator over the given dataset summary.
pub fn analysis_crew(summary: &str) -> Result<Crew, AnalysisError> {
    let cleaner = Task::new(
        agents::DATA_CLEANER,
        format!(
            "Given this data summary, {}\nData: {}",
            agents::DATA_CLEANER.goal,
            summary
        ),
        "Summary",
    );
    let selector = Task::new(
        agents::ALGORITHM_SELECTOR,
        format!(
            "Given the Data Cleaner output, {}",
            agents::ALGORITHM_SELECTOR.goal
        ),
        "JSON",
    )
    .with_context(&[0]);
    let generator = Task::new(
        agents::CODE_GENERATOR,
        format!(
            "Given the Algorithm Selector output, {}",
            agents::CODE_GENERATOR.goal
        ),
        "Python Code",
    )
    .with_context(&[0, 1]);

    Crew::new(vec![cleaner, selector, generator])
}
