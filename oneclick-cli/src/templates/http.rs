//! HTTP layer templates: resource, controller and form requests

/// Registry name of [`RESOURCE`]
pub const RESOURCE_NAME: &str = "http/resource";

/// JSON resource transformer
pub const RESOURCE: &str = r"<?php

namespace App\Http\Resources;

use Illuminate\Http\Request;
use Illuminate\Http\Resources\Json\JsonResource;

class {{ entity.class }}Resource extends JsonResource
{
    /**
     * Transform the resource into an array.
     *
     * @return array<string, mixed>
     */
    public function toArray(Request $request): array
    {
        return [
            'id' => $this->id,
{% for field in fields %}
            '{{ field }}' => $this->{{ field }},
{% endfor %}
        ];
    }
}
";

/// Registry name of [`CONTROLLER`]
pub const CONTROLLER_NAME: &str = "http/controller";

/// Controller delegating every action to the entity service
pub const CONTROLLER: &str = r"<?php

namespace App\Http\Controllers;

use App\Http\Requests\Store{{ entity.class }}Request;
use App\Http\Requests\Update{{ entity.class }}Request;
use App\Models\{{ entity.class }};
use App\Services\Interfaces\{{ entity.class }}Service;
use Illuminate\Http\JsonResponse;
use Illuminate\Http\Request;

class {{ entity.class }}Controller extends Controller
{
    protected {{ entity.class }}Service ${{ entity.variable }}Service;

    public function __construct({{ entity.class }}Service ${{ entity.variable }}Service)
    {
        $this->{{ entity.variable }}Service = ${{ entity.variable }}Service;
    }

    public function index(Request $request): JsonResponse
    {
        return $this->{{ entity.variable }}Service->index($request->input('per_page', {{ default_page_size }}));
    }

    public function show({{ entity.class }} ${{ entity.variable }}): JsonResponse
    {
        return $this->{{ entity.variable }}Service->show(${{ entity.variable }});
    }

    public function store(Store{{ entity.class }}Request $request): JsonResponse
    {
        return $this->{{ entity.variable }}Service->store($request);
    }

    public function update(Update{{ entity.class }}Request $request, {{ entity.class }} ${{ entity.variable }}): JsonResponse
    {
        return $this->{{ entity.variable }}Service->update($request, ${{ entity.variable }});
    }

    public function destroy({{ entity.class }} ${{ entity.variable }}): JsonResponse
    {
        return $this->{{ entity.variable }}Service->delete(${{ entity.variable }});
    }
}
";

/// Registry name of [`REQUEST`]
pub const REQUEST_NAME: &str = "http/request";

/// Form request with validation rules
pub const REQUEST: &str = r"<?php

namespace App\Http\Requests;

use Illuminate\Foundation\Http\FormRequest;

class {{ class_name }} extends FormRequest
{
    public function authorize(): bool
    {
        return true;
    }

    /**
     * @return array<string, mixed>
     */
    public function rules(): array
    {
        return [
{% for rule in rules %}
            '{{ rule.name }}' => '{{ rule.rule }}',
{% endfor %}
        ];
    }
}
";
