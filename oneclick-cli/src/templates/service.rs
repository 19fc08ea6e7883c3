//! Service layer templates
//!
//! Every CRUD body catches, logs and answers with a generic failure
//! response; the underlying exception never reaches the client.

/// Registry name of [`BASE_INTERFACE`]
pub const BASE_INTERFACE_NAME: &str = "service/base_interface";

/// Shared service contract
pub const BASE_INTERFACE: &str = r"<?php

namespace App\Services\Interfaces;

interface BaseService
{
    public function index($limit);

    public function show($model);

    public function store($request);

    public function update($request, $model);

    public function delete($model);
}
";

/// Registry name of [`BASE_IMPL`]
pub const BASE_IMPL_NAME: &str = "service/base_impl";

/// Base class giving every service the response and image helpers
pub const BASE_IMPL: &str = r"<?php

namespace App\Services\Implementation;

use App\Traits\ImageTrait;
use App\Traits\ResponseTrait;

class BaseServiceImpl
{
    use ResponseTrait, ImageTrait;
}
";

/// Registry name of [`INTERFACE`]
pub const INTERFACE_NAME: &str = "service/interface";

/// Entity service contract
pub const INTERFACE: &str = r"<?php

namespace App\Services\Interfaces;
{% if imports %}

{% for import in imports %}
use {{ import }};
{% endfor %}
{% endif %}

interface {{ entity.class }}Service extends BaseService
{
    public function index($limit);

    public function show(${{ entity.variable }});

    public function store($request);

    public function update($request, ${{ entity.variable }});

    public function delete(${{ entity.variable }});
{% for method in methods %}

    {{ method.signature }};
{% endfor %}
}
";

/// Registry name of [`IMPL`]
pub const IMPL_NAME: &str = "service/impl";

/// Entity service implementation
pub const IMPL: &str = r"<?php

namespace App\Services\Implementation;

use App\Http\Resources\{{ entity.class }}Resource;
{% if needs_model %}
use App\Models\{{ entity.class }};
{% endif %}
use App\Repositories\Interfaces\{{ entity.class }}Repository;
use App\Services\Interfaces\{{ entity.class }}Service;
{% for import in imports %}
use {{ import }};
{% endfor %}
use Illuminate\Support\Facades\Log;

class {{ entity.class }}ServiceImpl extends BaseServiceImpl implements {{ entity.class }}Service
{
    protected {{ entity.class }}Repository ${{ entity.variable }}Repository;

    public function __construct({{ entity.class }}Repository ${{ entity.variable }}Repository)
    {
        $this->{{ entity.variable }}Repository = ${{ entity.variable }}Repository;
    }

    public function index($limit)
    {
        try {
            ${{ entity.plural_variable }} = $this->{{ entity.variable }}Repository->index($limit);

            return $this->returnDataWithPagination(
                __('messages.{{ entity.message_key }}.index_success'),
                200,
                {{ entity.class }}Resource::collection(${{ entity.plural_variable }})
            );
        } catch (\Exception $e) {
            Log::error('{{ entity.class }} index error', ['error' => $e->getMessage()]);

            return $this->returnError(__('messages.{{ entity.message_key }}.index_failed'), 500);
        }
    }

    public function show(${{ entity.variable }})
    {
        try {
            ${{ entity.variable }} = $this->{{ entity.variable }}Repository->show(${{ entity.variable }}->id);

            return $this->returnData(
                __('messages.{{ entity.message_key }}.show_success'),
                200,
                new {{ entity.class }}Resource(${{ entity.variable }})
            );
        } catch (\Exception $e) {
            Log::error('{{ entity.class }} show error', ['error' => $e->getMessage()]);

            return $this->returnError(__('messages.{{ entity.message_key }}.show_failed'), 500);
        }
    }

    public function store($request)
    {
        try {
{% if image %}
            ${{ image.variable }} = $this->saveImage($request, '{{ image.name }}', '{{ entity.class }}/Images');

{% endif %}
            $data = [
{% for field in fields %}
                '{{ field.name }}' => {{ field.value }},
{% endfor %}
            ];

            $this->{{ entity.variable }}Repository->store($data);

            return $this->success(__('messages.{{ entity.message_key }}.create_success'), 201);
        } catch (\Exception $e) {
            Log::error('{{ entity.class }} store error', ['error' => $e->getMessage()]);

            return $this->returnError(__('messages.{{ entity.message_key }}.create_failed'), 500);
        }
    }

    public function update($request, ${{ entity.variable }})
    {
        try {
{% if image %}
            ${{ image.variable }} = $this->updateImage($request, '{{ image.name }}', '{{ entity.class }}/Images', ${{ entity.variable }}->{{ image.name }});

{% endif %}
{% for field in fields %}
            ${{ entity.variable }}->{{ field.name }} = {{ field.value }} ?? ${{ entity.variable }}->{{ field.name }};
{% endfor %}

            $this->{{ entity.variable }}Repository->update(${{ entity.variable }});

            return $this->success(__('messages.{{ entity.message_key }}.update_success'), 200);
        } catch (\Exception $e) {
            Log::error('{{ entity.class }} update error', ['error' => $e->getMessage()]);

            return $this->returnError(__('messages.{{ entity.message_key }}.update_failed'), 500);
        }
    }

    public function delete(${{ entity.variable }})
    {
        try {
{% if image %}
            $this->deleteImage(${{ entity.variable }}->{{ image.name }});
{% endif %}
            $this->{{ entity.variable }}Repository->delete(${{ entity.variable }});

            return $this->success(__('messages.{{ entity.message_key }}.delete_success'), 200);
        } catch (\Exception $e) {
            Log::error('{{ entity.class }} delete error', ['error' => $e->getMessage()]);

            return $this->returnError(__('messages.{{ entity.message_key }}.delete_failed'), 500);
        }
    }
{% for method in methods %}

    {{ method.signature }}
    {
        {{ method.body }}
    }
{% endfor %}
}
";
